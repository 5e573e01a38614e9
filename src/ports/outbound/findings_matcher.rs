use crate::model_building::domain::{CopyrightFinding, LicenseFinding, TextLocation};

/// A copyright statement with every location it was found at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyrightGroup {
    pub statement: String,
    pub locations: Vec<TextLocation>,
}

/// A license together with its locations and the copyrights attributed to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FindingsGroup {
    pub license: String,
    pub locations: Vec<TextLocation>,
    pub copyrights: Vec<CopyrightGroup>,
}

/// FindingsMatcher port for pairing raw license and copyright findings
///
/// The matcher is a pure function of its input. It is called once per scan
/// result and its output is consumed as-is.
pub trait FindingsMatcher {
    /// Groups the raw findings of one scan by license
    ///
    /// # Arguments
    /// * `license_findings` - License findings reported by the scanner
    /// * `copyright_findings` - Copyright findings reported by the scanner
    ///
    /// # Returns
    /// One group per distinct license, each carrying the copyrights matched to it
    fn match_findings(
        &self,
        license_findings: &[LicenseFinding],
        copyright_findings: &[CopyrightFinding],
    ) -> Vec<FindingsGroup>;
}

impl<T: FindingsMatcher + ?Sized> FindingsMatcher for &T {
    fn match_findings(
        &self,
        license_findings: &[LicenseFinding],
        copyright_findings: &[CopyrightFinding],
    ) -> Vec<FindingsGroup> {
        (**self).match_findings(license_findings, copyright_findings)
    }
}
