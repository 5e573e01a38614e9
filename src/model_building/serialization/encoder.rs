use super::document::{
    CopyrightBody, Entry, FindingBody, IssueBody, LicenseBody, ModelDocument, PackageBody,
    PathBody, RuleViolationBody, ScanResultBody, SurrogateId, TreeNodeBody, FORMAT_VERSION,
};
use crate::model_building::domain::{
    DependencyTreeNode, EvaluatedFinding, EvaluatedModel, FindingSubject, Handle,
};
use crate::shared::error::ModelError;
use crate::shared::Result;

/// Surrogate ids of one entity type, assigned in the order entities are visited.
struct SurrogateIds {
    kind: &'static str,
    ids: Vec<Option<SurrogateId>>,
    next: SurrogateId,
}

impl SurrogateIds {
    fn new(kind: &'static str, len: usize) -> Self {
        Self {
            kind,
            ids: vec![None; len],
            next: 0,
        }
    }

    /// Assigns the next id to the entity at `index`, which is visited for the first time.
    fn assign(&mut self, index: usize) -> SurrogateId {
        let id = self.next;
        self.ids[index] = Some(id);
        self.next += 1;
        id
    }

    fn reference<T>(&self, handle: Handle<T>) -> Result<SurrogateId> {
        self.ids
            .get(handle.index())
            .copied()
            .flatten()
            .ok_or_else(|| {
                ModelError::UnknownEntity {
                    kind: self.kind,
                    index: handle.index(),
                }
                .into()
            })
    }

    fn references<T>(&self, handles: impl IntoIterator<Item = Handle<T>>) -> Result<Vec<SurrogateId>> {
        handles.into_iter().map(|handle| self.reference(handle)).collect()
    }

    fn optional<T>(&self, handle: Option<Handle<T>>) -> Result<Option<SurrogateId>> {
        handle.map(|handle| self.reference(handle)).transpose()
    }
}

struct Ids {
    path_excludes: SurrogateIds,
    scope_excludes: SurrogateIds,
    issue_resolutions: SurrogateIds,
    rule_violation_resolutions: SurrogateIds,
    copyrights: SurrogateIds,
    licenses: SurrogateIds,
    scan_results: SurrogateIds,
    packages: SurrogateIds,
    paths: SurrogateIds,
    issues: SurrogateIds,
}

impl Ids {
    /// Visits every table in document order and assigns all ids up front, so
    /// that every later reference, including the cycle-closing ones, is a bare id.
    fn assign(model: &EvaluatedModel) -> Self {
        fn table(kind: &'static str, len: usize) -> SurrogateIds {
            let mut ids = SurrogateIds::new(kind, len);
            for index in 0..len {
                ids.assign(index);
            }
            ids
        }

        Self {
            path_excludes: table("path exclude", model.path_excludes.len()),
            scope_excludes: table("scope exclude", model.scope_excludes.len()),
            issue_resolutions: table("issue resolution", model.issue_resolutions.len()),
            rule_violation_resolutions: table(
                "rule violation resolution",
                model.rule_violation_resolutions.len(),
            ),
            copyrights: table("copyright", model.copyrights.len()),
            licenses: table("license", model.licenses.len()),
            scan_results: table("scan result", model.scan_results.len()),
            packages: table("package", model.packages.len()),
            paths: table("path", model.paths.len()),
            issues: table("issue", model.issues.len()),
        }
    }
}

/// Encodes a model into its graph-as-table document
///
/// # Errors
/// Returns [`ModelError::UnknownEntity`] if any handle points outside the
/// entity list it belongs to
pub fn encode_model(model: &EvaluatedModel) -> Result<ModelDocument> {
    let ids = Ids::assign(model);

    Ok(ModelDocument {
        format_version: Some(FORMAT_VERSION),
        path_excludes: entries(&ids.path_excludes, &model.path_excludes, |e| Ok(e.clone()))?,
        scope_excludes: entries(&ids.scope_excludes, &model.scope_excludes, |e| Ok(e.clone()))?,
        issue_resolutions: entries(&ids.issue_resolutions, &model.issue_resolutions, |r| {
            Ok(r.clone())
        })?,
        rule_violation_resolutions: entries(
            &ids.rule_violation_resolutions,
            &model.rule_violation_resolutions,
            |r| Ok(r.clone()),
        )?,
        copyrights: entries(&ids.copyrights, &model.copyrights, |c| {
            Ok(CopyrightBody {
                statement: c.statement().to_string(),
            })
        })?,
        licenses: entries(&ids.licenses, &model.licenses, |l| {
            Ok(LicenseBody {
                id: l.id().to_string(),
            })
        })?,
        scan_results: entries(&ids.scan_results, &model.scan_results, |s| {
            Ok(ScanResultBody {
                provenance: s.provenance.clone(),
                scanner: s.scanner.clone(),
                start_time: s.start_time,
                end_time: s.end_time,
                file_count: s.file_count,
                package_verification_code: s.package_verification_code.clone(),
                issues: ids.issues.references(s.issues.iter().copied())?,
            })
        })?,
        packages: entries(&ids.packages, &model.packages, |p| {
            Ok(PackageBody {
                id: p.id.clone(),
                is_project: p.is_project,
                definition_file_path: p.definition_file_path.clone(),
                purl: p.purl.clone(),
                declared_licenses: p.declared_licenses.clone(),
                declared_licenses_processed: ids
                    .licenses
                    .references(p.declared_licenses_processed.iter().copied())?,
                detected_licenses: ids.licenses.references(p.detected_licenses.iter().copied())?,
                concluded_license: p.concluded_license.clone(),
                description: p.description.clone(),
                homepage_url: p.homepage_url.clone(),
                binary_artifact: p.binary_artifact.clone(),
                source_artifact: p.source_artifact.clone(),
                vcs: p.vcs.clone(),
                vcs_processed: p.vcs_processed.clone(),
                curations: p.curations.clone(),
                paths: ids.paths.references(p.paths.iter().copied())?,
                levels: p.levels.clone(),
                scan_results: ids.scan_results.references(p.scan_results.iter().copied())?,
                findings: p
                    .findings
                    .iter()
                    .map(|finding| encode_finding(&ids, finding))
                    .collect::<Result<_>>()?,
                is_excluded: p.is_excluded,
                path_excludes: ids.path_excludes.references(p.path_excludes.iter().copied())?,
                scope_excludes: ids.scope_excludes.references(p.scope_excludes.iter().copied())?,
                issues: ids.issues.references(p.issues.iter().copied())?,
            })
        })?,
        paths: entries(&ids.paths, &model.paths, |p| {
            Ok(PathBody {
                pkg: ids.packages.reference(p.package)?,
                project: ids.packages.reference(p.project)?,
                scope: p.scope.clone(),
                path: p.path.clone(),
            })
        })?,
        issues: entries(&ids.issues, &model.issues, |i| {
            Ok(IssueBody {
                timestamp: i.timestamp,
                issue_type: i.issue_type,
                source: i.source.clone(),
                message: i.message.clone(),
                severity: i.severity,
                resolutions: ids.issue_resolutions.references(i.resolutions.iter().copied())?,
                pkg: ids.packages.optional(i.package)?,
                scan_result: ids.scan_results.optional(i.scan_result)?,
                path: ids.paths.optional(i.path)?,
            })
        })?,
        dependency_trees: model
            .dependency_trees
            .iter()
            .map(|tree| encode_tree(&ids, tree))
            .collect::<Result<_>>()?,
        rule_violations: model
            .rule_violations
            .iter()
            .map(|v| {
                Ok(RuleViolationBody {
                    rule: v.rule.clone(),
                    pkg: ids.packages.reference(v.package)?,
                    license: ids.licenses.optional(v.license)?,
                    license_source: v.license_source,
                    severity: v.severity,
                    message: v.message.clone(),
                    how_to_fix: v.how_to_fix.clone(),
                    resolutions: ids
                        .rule_violation_resolutions
                        .references(v.resolutions.iter().copied())?,
                })
            })
            .collect::<Result<_>>()?,
        declared_license_stats: model.declared_license_stats.clone(),
        detected_license_stats: model.detected_license_stats.clone(),
        statistics: model.statistics.clone(),
        severe_issue_threshold: model.severe_issue_threshold,
        severe_rule_violation_threshold: model.severe_rule_violation_threshold,
        repository_configuration: model.repository_configuration.clone(),
        labels: model.labels.clone(),
        custom_data: model.custom_data.clone(),
    })
}

fn entries<T, B>(
    ids: &SurrogateIds,
    values: &[T],
    mut body: impl FnMut(&T) -> Result<B>,
) -> Result<Vec<Entry<B>>> {
    values
        .iter()
        .enumerate()
        .map(|(index, value)| {
            let id = ids.reference(Handle::<T>::from_index(index))?;
            Ok(Entry {
                id,
                body: body(value)?,
            })
        })
        .collect()
}

fn encode_finding(ids: &Ids, finding: &EvaluatedFinding) -> Result<FindingBody> {
    let (license, copyright) = match finding.subject {
        FindingSubject::License(license) => (Some(ids.licenses.reference(license)?), None),
        FindingSubject::Copyright(copyright) => (None, Some(ids.copyrights.reference(copyright)?)),
    };

    Ok(FindingBody {
        kind: finding.kind(),
        license,
        copyright,
        path: finding.path.clone(),
        start_line: finding.start_line,
        end_line: finding.end_line,
        scan_result: ids.scan_results.reference(finding.scan_result)?,
    })
}

fn encode_tree(ids: &Ids, node: &DependencyTreeNode) -> Result<TreeNodeBody> {
    Ok(TreeNodeBody {
        title: node.title.clone(),
        key: node.key,
        linkage: node.linkage,
        pkg: ids.packages.optional(node.package)?,
        path_excludes: ids.path_excludes.references(node.path_excludes.iter().copied())?,
        scope_excludes: ids.scope_excludes.references(node.scope_excludes.iter().copied())?,
        issues: ids.issues.references(node.issues.iter().copied())?,
        children: node
            .children
            .iter()
            .map(|child| encode_tree(ids, child))
            .collect::<Result<_>>()?,
    })
}
