use super::{html_escape, link, page, size::format_bytes};
use crate::{
    models::{bucket::Bucket, object::Listing},
    routes::path::encode_path,
};
use chrono::{DateTime, Utc};

/// Index page for all buckets, in the order given.
pub fn render_buckets(buckets: &[Bucket]) -> String {
    let mut rows = String::new();
    for bucket in buckets {
        let href = format!("/{}/", encode_path(&bucket.name));
        rows.push_str(&format!(
            "<tr><td>{}</td><td>{}</td></tr>\n",
            link(&href, &bucket.name),
            format_date(bucket.created_at.as_ref())
        ));
    }

    let body = format!(
        concat!(
            "<h1>Buckets</h1>\n",
            "<table>\n<thead><tr><th>Name</th><th>Created</th></tr></thead>\n",
            "<tbody>\n{}</tbody>\n</table>\n"
        ),
        rows
    );
    page("Buckets", &body)
}

/// Directory index for `prefix` inside `bucket`.
///
/// Folders come first, then files, each in listing order. `request_path`
/// is only used for the page title and heading.
pub fn render_listing(bucket: &str, prefix: &str, listing: &Listing, request_path: &str) -> String {
    let bucket_href = format!("/{}/", encode_path(bucket));
    let mut rows = String::new();

    if !prefix.is_empty() {
        let href = format!("{}{}", bucket_href, encode_path(&parent_prefix(prefix)));
        rows.push_str(&format!(
            "<tr><td>{}</td><td class=\"size\">-</td><td></td></tr>\n",
            link(&href, "../")
        ));
    }

    for folder in &listing.folders {
        let relative = folder.strip_prefix(prefix).unwrap_or(folder);
        let name = relative.strip_suffix('/').unwrap_or(relative);
        let href = format!("{}{}", bucket_href, encode_path(folder));
        rows.push_str(&format!(
            "<tr class=\"folder\"><td>{}/</td><td class=\"size\">-</td><td></td></tr>\n",
            link(&href, name)
        ));
    }

    for file in &listing.files {
        let name = file.key.strip_prefix(prefix).unwrap_or(&file.key);
        // The zero-byte marker some tools create for the folder itself.
        if name.is_empty() {
            continue;
        }
        let href = format!("{}{}", bucket_href, encode_path(&file.key));
        rows.push_str(&format!(
            "<tr><td>{}</td><td class=\"size\">{}</td><td>{}</td></tr>\n",
            link(&href, name),
            format_bytes(file.size),
            format_date(file.last_modified.as_ref())
        ));
    }

    let title = format!("Index of {}", request_path);
    let body = format!(
        concat!(
            "<nav>{crumbs}</nav>\n",
            "<h1>{heading}</h1>\n",
            "<table>\n<thead><tr><th>Name</th><th>Size</th><th>Last modified</th></tr></thead>\n",
            "<tbody>\n{rows}</tbody>\n</table>\n"
        ),
        crumbs = breadcrumbs(bucket, prefix),
        heading = html_escape(&title),
        rows = rows
    );
    page(&title, &body)
}

/// Links from the bucket list down to the current prefix, each pointing at
/// its own cumulative path.
fn breadcrumbs(bucket: &str, prefix: &str) -> String {
    let bucket_href = format!("/{}/", encode_path(bucket));
    let mut crumbs = vec![link("/", "Buckets"), link(&bucket_href, bucket)];

    let mut cumulative = String::new();
    for segment in prefix.split('/').filter(|s| !s.is_empty()) {
        cumulative.push_str(segment);
        cumulative.push('/');
        let href = format!("{}{}", bucket_href, encode_path(&cumulative));
        crumbs.push(link(&href, segment));
    }

    crumbs.join(" / ")
}

/// `a/b/c/` -> `a/b/`, `a/` -> ``.
fn parent_prefix(prefix: &str) -> String {
    match prefix.trim_end_matches('/').rsplit_once('/') {
        Some((parent, _)) => format!("{}/", parent),
        None => String::new(),
    }
}

fn format_date(value: Option<&DateTime<Utc>>) -> String {
    value
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_default()
}
