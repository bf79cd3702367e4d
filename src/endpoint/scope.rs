use crate::error::IoflowError;

use super::{Endpoint, OpenRequest};

/// Open `endpoint` with its current settings, run `body`, then close it.
///
/// Closing is attempted whether or not the body succeeded. When both the
/// body and the close fail, the error is `ReleaseAfterFailure` carrying
/// both. If opening fails the body never runs and nothing is closed.
pub fn scoped<E, T, F>(endpoint: &mut E, body: F) -> Result<T, IoflowError>
where
    E: Endpoint + ?Sized,
    F: FnOnce(&mut E) -> Result<T, IoflowError>,
{
    endpoint.open(OpenRequest::default())?;
    let outcome = body(endpoint);
    let released = endpoint.close();

    match (outcome, released) {
        (Ok(value), Ok(())) => Ok(value),
        (Ok(_), Err(release)) => Err(release),
        (Err(body), Ok(())) => Err(body),
        (Err(body), Err(release)) => Err(IoflowError::ReleaseAfterFailure {
            body: Box::new(body),
            release: Box::new(release),
        }),
    }
}
