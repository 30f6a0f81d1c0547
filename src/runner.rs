//! Check runner: attempts every check and aggregates the failures.

use tracing::{debug, info};

use crate::context::RunContext;
use crate::multi_error::MultiError;
use crate::registry::{Check, Named};

/// A check together with the result of running it once.
#[derive(Debug)]
pub struct CheckOutcome<'a> {
    pub check: &'a Check,
    pub result: anyhow::Result<()>,
}

impl CheckOutcome<'_> {
    pub fn passed(&self) -> bool {
        self.result.is_ok()
    }

    /// Failure detail, if the check failed.
    pub fn error_text(&self) -> Option<String> {
        self.result.as_ref().err().map(|e| format!("{:#}", e))
    }
}

/// Everything a check run produced.
#[derive(Debug)]
pub struct CheckReport<'a> {
    /// One outcome per check, in input order, whether it passed or not.
    pub outcomes: Vec<CheckOutcome<'a>>,
    /// `Ok(())` unless at least one check failed.
    pub result: Result<(), MultiError>,
}

impl CheckReport<'_> {
    pub fn failed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.passed()).count()
    }

    pub fn passed(&self) -> bool {
        self.result.is_ok()
    }
}

/// Run every check in `checks` against `ctx`.
///
/// No check is skipped because an earlier one failed. Each failure is
/// recorded as `check <name> failed: <detail>`.
pub fn run_checks<'a>(ctx: &RunContext, checks: &[&'a Check]) -> CheckReport<'a> {
    let mut outcomes = Vec::with_capacity(checks.len());

    for &check in checks {
        debug!(check = check.name(), "running check");
        let result = check.run(ctx);
        if let Err(e) = &result {
            debug!(check = check.name(), error = %e, "check failed");
        }
        outcomes.push(CheckOutcome { check, result });
    }

    let mut errors = MultiError::new();
    for outcome in &outcomes {
        errors.insert(
            outcome
                .error_text()
                .map(|text| format!("check {} failed: {}", outcome.check.name(), text)),
        );
    }

    info!(
        total = outcomes.len(),
        failed = errors.len(),
        "checks finished"
    );

    CheckReport {
        outcomes,
        result: errors.into_result(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn ctx() -> RunContext {
        RunContext::new(".", "1.2.3".parse().unwrap())
    }

    fn pass(_: &RunContext) -> anyhow::Result<()> {
        Ok(())
    }

    fn fail_x(_: &RunContext) -> anyhow::Result<()> {
        anyhow::bail!("x")
    }

    #[test]
    fn test_run_checks_collects_all_outcomes() {
        let checks = [
            Check::new("A", "", pass),
            Check::new("B", "", fail_x),
            Check::new("C", "", pass),
        ];
        let selected: Vec<&Check> = checks.iter().collect();

        let report = run_checks(&ctx(), &selected);

        let summary: Vec<(&str, bool)> = report
            .outcomes
            .iter()
            .map(|o| (o.check.name(), o.passed()))
            .collect();
        assert_eq!(summary, vec![("A", true), ("B", false), ("C", true)]);
        assert_eq!(report.outcomes[1].error_text().as_deref(), Some("x"));
        assert_eq!(report.failed_count(), 1);

        let err = report.result.unwrap_err();
        assert_eq!(err.to_string(), "check B failed: x\n");
    }

    #[test]
    fn test_run_checks_all_pass_is_ok() {
        let checks = [Check::new("A", "", pass), Check::new("C", "", pass)];
        let selected: Vec<&Check> = checks.iter().collect();

        let report = run_checks(&ctx(), &selected);
        assert_eq!(report.outcomes.len(), 2);
        assert!(report.passed());
        assert!(report.result.is_ok());
    }

    #[test]
    fn test_run_checks_empty_list() {
        let report = run_checks(&ctx(), &[]);
        assert!(report.outcomes.is_empty());
        assert!(report.result.is_ok());
    }

    #[test]
    fn test_run_checks_does_not_stop_early() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let make = |name: &'static str, fail: bool| {
            let calls = Rc::clone(&calls);
            Check::new(name, "", move |_: &RunContext| {
                calls.borrow_mut().push(name);
                if fail {
                    anyhow::bail!("{} broke", name);
                }
                Ok(())
            })
        };
        let checks = [make("one", true), make("two", true), make("three", false)];
        let selected: Vec<&Check> = checks.iter().collect();

        let report = run_checks(&ctx(), &selected);

        assert_eq!(*calls.borrow(), vec!["one", "two", "three"]);
        let err = report.result.unwrap_err();
        assert_eq!(err.len(), 2);
        assert_eq!(
            err.to_string(),
            "check one failed: one broke\ncheck two failed: two broke\n"
        );
    }

    #[test]
    fn test_run_checks_sees_context() {
        let checks = [Check::new("version", "", |ctx: &RunContext| {
            anyhow::ensure!(ctx.version.as_str() == "1.2.3", "wrong version");
            Ok(())
        })];
        let selected: Vec<&Check> = checks.iter().collect();
        assert!(run_checks(&ctx(), &selected).passed());
    }

    #[test]
    fn test_error_text_includes_context_chain() {
        use anyhow::Context;
        let checks = [Check::new("ctx", "", |_: &RunContext| {
            Err::<(), _>(anyhow::anyhow!("exit status: 128"))
                .context("unable to find current branch")
        })];
        let selected: Vec<&Check> = checks.iter().collect();
        let report = run_checks(&ctx(), &selected);
        assert_eq!(
            report.outcomes[0].error_text().as_deref(),
            Some("unable to find current branch: exit status: 128")
        );
    }
}
