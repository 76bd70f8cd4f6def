//! License activation seam.

/// Verifies a license for the editor component. Called once per `unlock` request.
pub trait LicenseVerifier {
    /// Activate `license`, or explain why it was rejected.
    fn unlock(&mut self, license: &str) -> anyhow::Result<()>;
}

/// Accepts every non-empty license string; for hosts whose editor needs no activation.
#[derive(Clone, Copy, Debug, Default)]
pub struct AcceptAnyLicense;

impl LicenseVerifier for AcceptAnyLicense {
    fn unlock(&mut self, license: &str) -> anyhow::Result<()> {
        anyhow::ensure!(!license.trim().is_empty(), "license must be non-empty");
        Ok(())
    }
}

impl<F> LicenseVerifier for F
where
    F: FnMut(&str) -> anyhow::Result<()>,
{
    fn unlock(&mut self, license: &str) -> anyhow::Result<()> {
        self(license)
    }
}
