use urlencoding::encode;

pub fn build_search_url(template: &str, keywords: &str, location: &str, page: usize) -> String {
    template
        .replace("{keywords}", &encode(keywords))
        .replace("{location}", &encode(location))
        .replace("{page}", &page.to_string())
}

/// Scheme and host of `url`, used to absolutize relative links.
pub fn origin_of(url: &str) -> String {
    let Some(scheme_end) = url.find("://") else {
        return url.trim_end_matches('/').to_string();
    };

    let host_start = scheme_end + 3;
    let host_end = url[host_start..]
        .find(['/', '?', '#'])
        .map_or(url.len(), |i| host_start + i);

    url[..host_end].to_string()
}
