//! Download task: single HTTP GET streamed into the output directory.

use std::io::{self, Write};
use std::path::Path;

use crate::config::DownloadConfig;
use crate::storage::OutputFile;
use crate::url_model;

use super::error::{TaskError, TransportKind};

/// Fetches `url` into `output_dir` under a name derived from the URL's last path
/// segment. Returns the local file name.
///
/// The body is written to a temp file and only renamed into place after a 2xx
/// response, so a failed download leaves no file behind.
pub fn fetch(url: &str, output_dir: &Path, opts: &DownloadConfig) -> Result<String, TaskError> {
    let file_name = url_model::derive_filename(url);
    let mut out = OutputFile::create(output_dir, &file_name)
        .map_err(|e| TaskError::write(output_dir.join(&file_name), e))?;

    let mut easy = curl::easy::Easy::new();
    configure(&mut easy, url, opts).map_err(|e| transport_error(url, &e))?;

    let mut write_error: Option<io::Error> = None;
    let performed = {
        let mut transfer = easy.transfer();
        transfer
            .write_function(|data| match out.write_all(data) {
                Ok(()) => Ok(data.len()),
                Err(e) => {
                    write_error = Some(e);
                    Ok(0) // abort transfer
                }
            })
            .map_err(|e| transport_error(url, &e))?;
        transfer.perform()
    };

    if let Some(e) = write_error {
        return Err(TaskError::write(out.final_path(), e));
    }
    performed.map_err(|e| transport_error(url, &e))?;

    let code = easy.response_code().map_err(|e| transport_error(url, &e))?;
    if !(200..300).contains(&code) {
        return Err(TaskError::Transport {
            url: url.to_string(),
            kind: TransportKind::Http(code),
            detail: format!("GET {} returned HTTP {}", url, code),
        });
    }

    let final_path = out
        .finalize()
        .map_err(|e| TaskError::write(output_dir.join(&file_name), e))?;
    tracing::debug!(url, path = %final_path.display(), "download saved");
    Ok(file_name)
}

fn configure(easy: &mut curl::easy::Easy, url: &str, opts: &DownloadConfig) -> Result<(), curl::Error> {
    easy.url(url)?;
    easy.get(true)?;
    easy.follow_location(true)?;
    easy.max_redirections(opts.max_redirections)?;
    easy.connect_timeout(opts.connect_timeout())?;
    easy.low_speed_limit(1)?;
    easy.low_speed_time(opts.low_speed_time())?;
    if let Some(timeout) = opts.timeout() {
        easy.timeout(timeout)?;
    }
    Ok(())
}

/// Classify a curl error for user-facing failure messages.
pub fn classify_curl_error(e: &curl::Error) -> TransportKind {
    if e.is_operation_timedout() {
        return TransportKind::Timeout;
    }
    if e.is_url_malformed() || e.is_unsupported_protocol() {
        return TransportKind::InvalidUrl;
    }
    if e.is_couldnt_connect()
        || e.is_couldnt_resolve_host()
        || e.is_couldnt_resolve_proxy()
        || e.is_read_error()
        || e.is_recv_error()
        || e.is_send_error()
        || e.is_got_nothing()
    {
        return TransportKind::Connection;
    }
    TransportKind::Other
}

fn transport_error(url: &str, e: &curl::Error) -> TaskError {
    let detail = e
        .extra_description()
        .map(str::to_string)
        .unwrap_or_else(|| e.description().to_string());
    TaskError::Transport {
        url: url.to_string(),
        kind: classify_curl_error(e),
        detail,
    }
}
