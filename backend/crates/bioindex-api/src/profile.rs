//! Elapsed-time measurement for response profiles.

use std::future::Future;
use std::time::Instant;

/// Await `fut` and return its output with the elapsed wall time in seconds.
pub async fn profile<F: Future>(fut: F) -> (F::Output, f64) {
    let start = Instant::now();
    let output = fut.await;
    (output, start.elapsed().as_secs_f64())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_web::test]
    async fn test_profile_reports_output_and_time() {
        let (value, secs) = profile(async { 40 + 2 }).await;
        assert_eq!(value, 42);
        assert!(secs >= 0.0);
    }
}
