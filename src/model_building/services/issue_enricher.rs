use super::entity_store::EntityStore;
use crate::model_building::domain::{
    EvaluatedIssue, EvaluatedRuleViolation, Identifier, IssueRef, IssueType, License, OrtIssue,
    PackageRef, PathRef, RuleViolation, ScanResultRef,
};
use crate::model_building::domain::package::push_distinct;
use crate::ports::outbound::ResolutionProvider;
use crate::shared::error::ModelError;
use crate::shared::Result;

/// The entities an issue was raised for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IssueOwner {
    pub package: PackageRef,
    pub scan_result: Option<ScanResultRef>,
    pub path: Option<PathRef>,
}

impl IssueOwner {
    pub fn package(package: PackageRef) -> Self {
        Self {
            package,
            scan_result: None,
            path: None,
        }
    }

    pub fn with_scan_result(mut self, scan_result: ScanResultRef) -> Self {
        self.scan_result = Some(scan_result);
        self
    }

    pub fn with_path(mut self, path: PathRef) -> Self {
        self.path = Some(path);
        self
    }
}

/// IssueEnricher attaches resolutions and owners to raw issues and rule violations
pub struct IssueEnricher;

impl IssueEnricher {
    /// Enriches a single issue and interns it by full value
    ///
    /// # Arguments
    /// * `store` - Arenas of the current build
    /// * `resolutions` - Source of the resolutions applying to the issue
    /// * `issue` - The raw issue
    /// * `issue_type` - The stage that raised the issue
    /// * `owner` - Package, scan result and path the issue belongs to
    pub fn enrich_issue<R: ResolutionProvider + ?Sized>(
        store: &mut EntityStore,
        resolutions: &R,
        issue: &OrtIssue,
        issue_type: IssueType,
        owner: IssueOwner,
    ) -> IssueRef {
        let resolution_refs = store
            .issue_resolutions
            .add_all_if_required(resolutions.issue_resolutions_for(issue));

        store.issues.add_if_required(EvaluatedIssue {
            timestamp: issue.timestamp,
            issue_type,
            source: issue.source.clone(),
            message: issue.message.clone(),
            severity: issue.severity,
            resolutions: resolution_refs,
            package: Some(owner.package),
            scan_result: owner.scan_result,
            path: owner.path,
        })
    }

    /// Enriches every issue of a list; equal issues collapse to one handle
    pub fn enrich_issues<R: ResolutionProvider + ?Sized>(
        store: &mut EntityStore,
        resolutions: &R,
        issues: &[OrtIssue],
        issue_type: IssueType,
        owner: IssueOwner,
    ) -> Vec<IssueRef> {
        let mut handles = Vec::with_capacity(issues.len());
        for issue in issues {
            let handle = Self::enrich_issue(store, resolutions, issue, issue_type, owner);
            push_distinct(&mut handles, handle);
        }
        handles
    }

    /// Binds a rule violation to its already registered package
    ///
    /// # Errors
    /// Returns [`ModelError::MissingPackage`] if the violation names a package
    /// that is neither a known project nor a known package
    pub fn enrich_rule_violation<R: ResolutionProvider + ?Sized>(
        store: &mut EntityStore,
        resolutions: &R,
        violation: &RuleViolation,
    ) -> Result<EvaluatedRuleViolation> {
        let package = Self::require_package(
            store,
            &violation.pkg,
            &format!("rule violation '{}'", violation.rule),
        )?;

        let resolution_refs = store
            .rule_violation_resolutions
            .add_all_if_required(resolutions.rule_violation_resolutions_for(violation));
        let license = violation
            .license
            .as_deref()
            .map(|license| store.licenses.add_if_required(License::new(license)));

        Ok(EvaluatedRuleViolation {
            rule: violation.rule.clone(),
            package,
            license,
            license_source: violation.license_source,
            severity: violation.severity,
            message: violation.message.clone(),
            how_to_fix: violation.how_to_fix.clone(),
            resolutions: resolution_refs,
        })
    }

    /// Looks up the package registered for `id`
    ///
    /// # Errors
    /// Returns [`ModelError::MissingPackage`] naming `id` and `context` if none exists
    pub fn require_package(store: &EntityStore, id: &Identifier, context: &str) -> Result<PackageRef> {
        store.packages.handle_of(id).ok_or_else(|| {
            ModelError::MissingPackage {
                id: id.to_string(),
                context: context.to_string(),
            }
            .into()
        })
    }
}
