use super::document::{
    Entry, FindingBody, IssueBody, ModelDocument, PackageBody, SurrogateId, TreeNodeBody,
    FORMAT_VERSION,
};
use crate::model_building::domain::{
    Copyright, DependencyTreeNode, EvaluatedFinding, EvaluatedIssue, EvaluatedModel,
    EvaluatedPackage, EvaluatedPackagePath, EvaluatedRuleViolation, EvaluatedScanResult,
    FindingKind, FindingSubject, Handle, License,
};
use crate::shared::error::ModelError;
use crate::shared::Result;
use std::collections::HashMap;

/// Maps the surrogate ids of one table to row positions.
struct SurrogateIndex {
    kind: &'static str,
    positions: HashMap<SurrogateId, usize>,
}

impl SurrogateIndex {
    fn of<B>(kind: &'static str, table: &[Entry<B>]) -> Result<Self> {
        let mut positions = HashMap::with_capacity(table.len());
        for (position, entry) in table.iter().enumerate() {
            if positions.insert(entry.id, position).is_some() {
                return Err(ModelError::DuplicateSurrogate { kind, id: entry.id }.into());
            }
        }
        Ok(Self { kind, positions })
    }

    fn resolve<T>(&self, id: SurrogateId) -> Result<Handle<T>> {
        self.positions
            .get(&id)
            .map(|position| Handle::from_index(*position))
            .ok_or_else(|| ModelError::UnknownSurrogate { kind: self.kind, id }.into())
    }

    fn resolve_all<T>(&self, ids: &[SurrogateId]) -> Result<Vec<Handle<T>>> {
        ids.iter().map(|id| self.resolve(*id)).collect()
    }

    fn resolve_optional<T>(&self, id: Option<SurrogateId>) -> Result<Option<Handle<T>>> {
        id.map(|id| self.resolve(id)).transpose()
    }
}

struct Indexes {
    path_excludes: SurrogateIndex,
    scope_excludes: SurrogateIndex,
    issue_resolutions: SurrogateIndex,
    rule_violation_resolutions: SurrogateIndex,
    copyrights: SurrogateIndex,
    licenses: SurrogateIndex,
    scan_results: SurrogateIndex,
    packages: SurrogateIndex,
    paths: SurrogateIndex,
    issues: SurrogateIndex,
}

impl Indexes {
    fn of(document: &ModelDocument) -> Result<Self> {
        Ok(Self {
            path_excludes: SurrogateIndex::of("path exclude", &document.path_excludes)?,
            scope_excludes: SurrogateIndex::of("scope exclude", &document.scope_excludes)?,
            issue_resolutions: SurrogateIndex::of("issue resolution", &document.issue_resolutions)?,
            rule_violation_resolutions: SurrogateIndex::of(
                "rule violation resolution",
                &document.rule_violation_resolutions,
            )?,
            copyrights: SurrogateIndex::of("copyright", &document.copyrights)?,
            licenses: SurrogateIndex::of("license", &document.licenses)?,
            scan_results: SurrogateIndex::of("scan result", &document.scan_results)?,
            packages: SurrogateIndex::of("package", &document.packages)?,
            paths: SurrogateIndex::of("path", &document.paths)?,
            issues: SurrogateIndex::of("issue", &document.issues)?,
        })
    }
}

/// Rebuilds a model from its document
///
/// Issues are first built without their package and scan result back-references;
/// [`reconcile`] then restores them from the lists that own each issue.
///
/// # Errors
/// Fails on an unsupported or missing format version, duplicate or unknown
/// surrogate ids and findings lacking their subject. No partial model is returned.
pub fn decode_model(document: ModelDocument) -> Result<EvaluatedModel> {
    match document.format_version {
        None => return Err(ModelError::MissingField { field: "format_version" }.into()),
        Some(FORMAT_VERSION) => {}
        Some(other) => {
            return Err(ModelError::MalformedDocument {
                details: format!(
                    "unsupported format version {} (expected {})",
                    other, FORMAT_VERSION
                ),
            }
            .into())
        }
    }

    let idx = Indexes::of(&document)?;

    // Owner ids as written, used only where no list claims an issue.
    let written_owners = document
        .issues
        .iter()
        .map(|entry| {
            Ok((
                idx.packages.resolve_optional(entry.body.pkg)?,
                idx.scan_results.resolve_optional(entry.body.scan_result)?,
            ))
        })
        .collect::<Result<Vec<_>>>()?;

    let issues = document
        .issues
        .iter()
        .map(|entry| decode_issue(&idx, &entry.body))
        .collect::<Result<Vec<_>>>()?;

    let scan_results = document
        .scan_results
        .into_iter()
        .map(|entry| {
            let body = entry.body;
            Ok(EvaluatedScanResult {
                provenance: body.provenance,
                scanner: body.scanner,
                start_time: body.start_time,
                end_time: body.end_time,
                file_count: body.file_count,
                package_verification_code: body.package_verification_code,
                issues: idx.issues.resolve_all(&body.issues)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let packages = document
        .packages
        .into_iter()
        .map(|entry| decode_package(&idx, entry.body))
        .collect::<Result<Vec<_>>>()?;

    let paths = document
        .paths
        .into_iter()
        .map(|entry| {
            Ok(EvaluatedPackagePath {
                package: idx.packages.resolve(entry.body.pkg)?,
                project: idx.packages.resolve(entry.body.project)?,
                scope: entry.body.scope,
                path: entry.body.path,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let dependency_trees = document
        .dependency_trees
        .into_iter()
        .map(|node| decode_tree(&idx, node))
        .collect::<Result<Vec<_>>>()?;

    let rule_violations = document
        .rule_violations
        .into_iter()
        .map(|body| {
            Ok(EvaluatedRuleViolation {
                rule: body.rule,
                package: idx.packages.resolve(body.pkg)?,
                license: idx.licenses.resolve_optional(body.license)?,
                license_source: body.license_source,
                severity: body.severity,
                message: body.message,
                how_to_fix: body.how_to_fix,
                resolutions: idx.rule_violation_resolutions.resolve_all(&body.resolutions)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let mut model = EvaluatedModel {
        path_excludes: document.path_excludes.into_iter().map(|e| e.body).collect(),
        scope_excludes: document.scope_excludes.into_iter().map(|e| e.body).collect(),
        issue_resolutions: document.issue_resolutions.into_iter().map(|e| e.body).collect(),
        rule_violation_resolutions: document
            .rule_violation_resolutions
            .into_iter()
            .map(|e| e.body)
            .collect(),
        copyrights: document
            .copyrights
            .into_iter()
            .map(|e| Copyright::new(&e.body.statement))
            .collect(),
        licenses: document
            .licenses
            .into_iter()
            .map(|e| License::new(&e.body.id))
            .collect(),
        scan_results,
        packages,
        paths,
        issues,
        dependency_trees,
        rule_violations,
        declared_license_stats: document.declared_license_stats,
        detected_license_stats: document.detected_license_stats,
        statistics: document.statistics,
        severe_issue_threshold: document.severe_issue_threshold,
        severe_rule_violation_threshold: document.severe_rule_violation_threshold,
        repository_configuration: document.repository_configuration,
        labels: document.labels,
        custom_data: document.custom_data,
    };

    reconcile(&mut model);
    for (issue, (package, scan_result)) in model.issues.iter_mut().zip(written_owners) {
        if issue.package.is_none() {
            issue.package = package;
        }
        if issue.scan_result.is_none() {
            issue.scan_result = scan_result;
        }
    }

    tracing::debug!(
        packages = model.packages.len(),
        issues = model.issues.len(),
        "decoded model document"
    );
    Ok(model)
}

/// Restores the package and scan result back-references of all issues from
/// the packages, scan results and tree nodes that list them.
pub fn reconcile(model: &mut EvaluatedModel) {
    let EvaluatedModel {
        packages,
        scan_results,
        issues,
        dependency_trees,
        ..
    } = model;

    for (position, package) in packages.iter().enumerate() {
        for issue in &package.issues {
            if let Some(issue) = issues.get_mut(issue.index()) {
                issue.package = Some(Handle::from_index(position));
            }
        }
    }

    for (position, scan_result) in scan_results.iter().enumerate() {
        for issue in &scan_result.issues {
            if let Some(issue) = issues.get_mut(issue.index()) {
                issue.scan_result = Some(Handle::from_index(position));
            }
        }
    }

    for tree in dependency_trees.iter() {
        tree.visit(&mut |node| {
            if let Some(package) = node.package {
                for issue in &node.issues {
                    if let Some(issue) = issues.get_mut(issue.index()) {
                        issue.package = Some(package);
                    }
                }
            }
        });
    }
}

fn decode_issue(idx: &Indexes, body: &IssueBody) -> Result<EvaluatedIssue> {
    Ok(EvaluatedIssue {
        timestamp: body.timestamp,
        issue_type: body.issue_type,
        source: body.source.clone(),
        message: body.message.clone(),
        severity: body.severity,
        resolutions: idx.issue_resolutions.resolve_all(&body.resolutions)?,
        package: None,
        scan_result: None,
        path: idx.paths.resolve_optional(body.path)?,
    })
}

fn decode_finding(idx: &Indexes, body: FindingBody) -> Result<EvaluatedFinding> {
    let subject = match body.kind {
        FindingKind::License => {
            let id = body.license.ok_or(ModelError::MissingField { field: "license" })?;
            FindingSubject::License(idx.licenses.resolve(id)?)
        }
        FindingKind::Copyright => {
            let id = body
                .copyright
                .ok_or(ModelError::MissingField { field: "copyright" })?;
            FindingSubject::Copyright(idx.copyrights.resolve(id)?)
        }
    };

    Ok(EvaluatedFinding {
        subject,
        path: body.path,
        start_line: body.start_line,
        end_line: body.end_line,
        scan_result: idx.scan_results.resolve(body.scan_result)?,
    })
}

fn decode_package(idx: &Indexes, body: PackageBody) -> Result<EvaluatedPackage> {
    Ok(EvaluatedPackage {
        declared_licenses_processed: idx.licenses.resolve_all(&body.declared_licenses_processed)?,
        detected_licenses: idx
            .licenses
            .resolve_all(&body.detected_licenses)?
            .into_iter()
            .collect(),
        paths: idx.paths.resolve_all(&body.paths)?,
        scan_results: idx.scan_results.resolve_all(&body.scan_results)?,
        findings: body
            .findings
            .into_iter()
            .map(|finding| decode_finding(idx, finding))
            .collect::<Result<_>>()?,
        path_excludes: idx.path_excludes.resolve_all(&body.path_excludes)?,
        scope_excludes: idx.scope_excludes.resolve_all(&body.scope_excludes)?,
        issues: idx.issues.resolve_all(&body.issues)?,
        id: body.id,
        is_project: body.is_project,
        definition_file_path: body.definition_file_path,
        purl: body.purl,
        declared_licenses: body.declared_licenses,
        concluded_license: body.concluded_license,
        description: body.description,
        homepage_url: body.homepage_url,
        binary_artifact: body.binary_artifact,
        source_artifact: body.source_artifact,
        vcs: body.vcs,
        vcs_processed: body.vcs_processed,
        curations: body.curations,
        levels: body.levels,
        is_excluded: body.is_excluded,
    })
}

fn decode_tree(idx: &Indexes, body: TreeNodeBody) -> Result<DependencyTreeNode> {
    Ok(DependencyTreeNode {
        title: body.title,
        key: body.key,
        linkage: body.linkage,
        package: idx.packages.resolve_optional(body.pkg)?,
        path_excludes: idx.path_excludes.resolve_all(&body.path_excludes)?,
        scope_excludes: idx.scope_excludes.resolve_all(&body.scope_excludes)?,
        issues: idx.issues.resolve_all(&body.issues)?,
        children: body
            .children
            .into_iter()
            .map(|child| decode_tree(idx, child))
            .collect::<Result<_>>()?,
    })
}
