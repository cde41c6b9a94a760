//! Development headers
//!
//! Every response leaving the server allows any origin and forbids caching
//! without revalidation. The headers are appended after the response has been
//! built, so builders stay unaware of them and nothing they set is replaced.

use hyper::header::{HeaderValue, ACCESS_CONTROL_ALLOW_ORIGIN, CACHE_CONTROL};
use hyper::Response;

/// Append `Access-Control-Allow-Origin: *` and `Cache-Control: no-cache`
pub fn inject_dev_headers<B>(response: &mut Response<B>) {
    let headers = response.headers_mut();
    headers.append(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    headers.append(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyper::header::CONTENT_TYPE;

    #[test]
    fn test_headers_added() {
        let mut response = Response::new(());
        inject_dev_headers(&mut response);
        assert_eq!(response.headers()[ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(response.headers()[CACHE_CONTROL], "no-cache");
    }

    #[test]
    fn test_existing_headers_kept() {
        let mut response = Response::builder()
            .header(CONTENT_TYPE, "text/css")
            .header(CACHE_CONTROL, "must-revalidate")
            .body(())
            .unwrap();
        inject_dev_headers(&mut response);

        assert_eq!(response.headers()[CONTENT_TYPE], "text/css");
        let cache: Vec<_> = response.headers().get_all(CACHE_CONTROL).iter().collect();
        assert_eq!(cache, ["must-revalidate", "no-cache"]);
    }
}
