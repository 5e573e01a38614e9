use super::entity_store::EntityStore;
use crate::model_building::domain::{
    Copyright, EvaluatedFinding, License, PackageRef, ScanResultRef, ScanSummary,
};
use crate::ports::outbound::FindingsMatcher;

/// FindingAttacher turns the raw findings of one scan into attributed findings
///
/// License and copyright values are interned on the way, and every license the
/// matcher reports is recorded as detected for the owning package.
pub struct FindingAttacher;

impl FindingAttacher {
    /// Matches the findings of `summary` and attaches them to `package`
    ///
    /// # Arguments
    /// * `store` - Arenas of the current build
    /// * `matcher` - Pairs license findings with copyright findings
    /// * `summary` - The raw scan summary
    /// * `scan_result` - The interned scan result the summary belongs to
    /// * `package` - The package the scan was performed for
    ///
    /// # Returns
    /// The number of findings emitted
    pub fn attach<M: FindingsMatcher + ?Sized>(
        store: &mut EntityStore,
        matcher: &M,
        summary: &ScanSummary,
        scan_result: ScanResultRef,
        package: PackageRef,
    ) -> usize {
        let groups = matcher.match_findings(&summary.license_findings, &summary.copyright_findings);
        let package_id = store.packages.core(package).id.clone();

        let mut findings = Vec::new();
        for group in groups {
            for copyright_group in &group.copyrights {
                let copyright = store
                    .copyrights
                    .add_if_required(Copyright::new(&copyright_group.statement));
                findings.extend(
                    copyright_group
                        .locations
                        .iter()
                        .map(|location| EvaluatedFinding::copyright(copyright, location, scan_result)),
                );
            }

            // Groups holding only orphaned copyrights carry no license finding.
            if group.locations.is_empty() {
                continue;
            }

            let license_value = License::new(&group.license);
            store.record_detected_license(&license_value, &package_id);
            let license = store.licenses.add_if_required(license_value);
            findings.extend(
                group
                    .locations
                    .iter()
                    .map(|location| EvaluatedFinding::license(license, location, scan_result)),
            );
        }

        let count = findings.len();
        tracing::debug!(package = %package_id, findings = count, "attached scan findings");
        store.packages.accumulator_mut(package).add_findings(findings);
        count
    }
}
