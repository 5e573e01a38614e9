use crate::model_building::domain::{CopyrightFinding, LicenseFinding, TextLocation};
use crate::ports::outbound::{CopyrightGroup, FindingsGroup, FindingsMatcher};
use indexmap::{IndexMap, IndexSet};

/// Default distance in lines between a copyright and a license finding for
/// them to be considered related.
pub const DEFAULT_TOLERANCE_LINES: u32 = 5;

/// License used for copyrights that can be matched to no license at all.
const NO_ASSERTION: &str = "NOASSERTION";

/// ProximityFindingsMatcher adapter pairing copyrights with nearby licenses
///
/// A copyright belongs to every license found in the same file within
/// `tolerance_lines` of it. Copyrights with no nearby license go to the root
/// licenses, those found in files at the top of the source tree, and to
/// `NOASSERTION` if there are none.
#[derive(Debug, Clone)]
pub struct ProximityFindingsMatcher {
    tolerance_lines: u32,
}

impl ProximityFindingsMatcher {
    pub fn new(tolerance_lines: u32) -> Self {
        Self { tolerance_lines }
    }

    fn is_nearby(&self, license: &TextLocation, copyright: &TextLocation) -> bool {
        license.path == copyright.path
            && copyright.start_line <= license.end_line.saturating_add(self.tolerance_lines)
            && license.start_line <= copyright.end_line.saturating_add(self.tolerance_lines)
    }
}

impl Default for ProximityFindingsMatcher {
    fn default() -> Self {
        Self::new(DEFAULT_TOLERANCE_LINES)
    }
}

fn is_root_path(path: &str) -> bool {
    !path.trim_start_matches("./").contains('/')
}

type GroupParts = (Vec<TextLocation>, IndexMap<String, Vec<TextLocation>>);

impl FindingsMatcher for ProximityFindingsMatcher {
    fn match_findings(
        &self,
        license_findings: &[LicenseFinding],
        copyright_findings: &[CopyrightFinding],
    ) -> Vec<FindingsGroup> {
        let mut groups: IndexMap<String, GroupParts> = IndexMap::new();
        for finding in license_findings {
            groups
                .entry(finding.license.clone())
                .or_default()
                .0
                .push(finding.location.clone());
        }

        let root_licenses: IndexSet<&str> = license_findings
            .iter()
            .filter(|finding| is_root_path(&finding.location.path))
            .map(|finding| finding.license.as_str())
            .collect();

        for copyright in copyright_findings {
            let nearby: IndexSet<&str> = license_findings
                .iter()
                .filter(|finding| self.is_nearby(&finding.location, &copyright.location))
                .map(|finding| finding.license.as_str())
                .collect();

            let targets: Vec<&str> = if !nearby.is_empty() {
                nearby.into_iter().collect()
            } else if !root_licenses.is_empty() {
                root_licenses.iter().copied().collect()
            } else {
                vec![NO_ASSERTION]
            };

            for license in targets {
                groups
                    .entry(license.to_string())
                    .or_default()
                    .1
                    .entry(copyright.statement.clone())
                    .or_default()
                    .push(copyright.location.clone());
            }
        }

        groups
            .into_iter()
            .map(|(license, (locations, copyrights))| FindingsGroup {
                license,
                locations,
                copyrights: copyrights
                    .into_iter()
                    .map(|(statement, locations)| CopyrightGroup {
                        statement,
                        locations,
                    })
                    .collect(),
            })
            .collect()
    }
}
