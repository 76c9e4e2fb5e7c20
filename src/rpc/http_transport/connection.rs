use std::path::Path;

use reqwest::Url;

use crate::error::ChainError;

/// Credential precedence: explicit user+pass, then cookie file, then none.
pub(super) fn resolve_auth(
    user: Option<&str>,
    pass: Option<&str>,
    cookie_file: Option<&Path>,
) -> Result<Option<(String, String)>, ChainError> {
    match (user, pass) {
        (Some(u), Some(p)) => return Ok(Some((u.to_owned(), p.to_owned()))),
        (Some(_), None) | (None, Some(_)) => {
            return Err(ChainError::InvalidConfig(
                "rpc_user and rpc_pass must be set together".to_owned(),
            ));
        }
        (None, None) => {}
    }

    let Some(cookie_file) = cookie_file else {
        return Ok(None);
    };
    read_cookie(cookie_file).map(Some)
}

/// Read a bitcoind `username:password` cookie file.
fn read_cookie(path: &Path) -> Result<(String, String), ChainError> {
    let bad = |message: String| ChainError::InvalidConfig(message);

    let content = std::fs::read_to_string(path)
        .map_err(|e| bad(format!("failed to read rpc cookie file {}: {e}", path.display())))?;
    let line = content
        .lines()
        .next()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .ok_or_else(|| bad(format!("rpc cookie file {} is empty", path.display())))?;

    match line.split_once(':') {
        Some((user, pass)) if !user.is_empty() && !pass.is_empty() => {
            Ok((user.to_owned(), pass.to_owned()))
        }
        _ => Err(bad(format!(
            "rpc cookie file {} must contain `username:password`",
            path.display()
        ))),
    }
}

pub(super) fn parse_connection(connection: &str) -> Result<String, ChainError> {
    let parsed = Url::parse(connection).map_err(|e| {
        ChainError::InvalidConfig(format!(
            "invalid rpc_url `{connection}`: expected HTTP(S) URL ({e})"
        ))
    })?;
    match parsed.scheme() {
        "http" | "https" => Ok(connection.to_owned()),
        other => Err(ChainError::InvalidConfig(format!(
            "unsupported rpc_url scheme `{other}`; expected http or https"
        ))),
    }
}
