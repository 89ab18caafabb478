use crate::error::Error;
use crate::fingerprint::fingerprint_for_violation;
use crate::graph::ArtifactGraph;
use crate::policy::EffectiveConfig;
use crate::predicates::NameMatcher;
use crate::rule::{EvaluationResult, RuleBox};
use archguard_types::ids::TOOL_NAME;
use archguard_types::{
    ArchReport, ArchReportData, Priority, RuleOutcome, SCHEMA_REPORT_V1, ToolMeta, Verdict,
    ViolationRecord,
};
use rayon::prelude::*;
use tracing::{debug, info, info_span};

/// Evaluate every enabled rule against `graph` and fold the results into a report.
///
/// Rules run in parallel over the shared graph. The first resolution failure
/// aborts the run; rule violations never do.
pub fn check_all(
    rules: &[RuleBox],
    graph: &ArtifactGraph,
    cfg: &EffectiveConfig,
) -> Result<ArchReport, Error> {
    let span = info_span!("check_all", profile = %cfg.profile, rules = rules.len());
    let _guard = span.enter();

    let mut results: Vec<EvaluationResult> = rules
        .par_iter()
        .filter(|rule| cfg.is_enabled(rule.description().as_str()))
        .map(|rule| apply_policy(rule.evaluate(graph)?, cfg))
        .collect::<Result<_, Error>>()?;

    let skipped = rules.len() - results.len();
    if skipped > 0 {
        debug!(skipped, "rules disabled by configuration");
    }

    // Deterministic ordering before truncation.
    results.sort_by(compare_results);

    let verdict = compute_verdict(&results, cfg.fail_on);

    let violations_total: usize = results.iter().map(|r| r.violations().len()).sum();
    let mut budget = cfg.max_violations;
    let mut outcomes = Vec::with_capacity(results.len());
    for result in &results {
        let emitted = result.violations().len().min(budget);
        budget -= emitted;
        outcomes.push(outcome(result, emitted));
    }

    let violations_emitted = violations_total.min(cfg.max_violations);
    let truncated_reason = (violations_emitted < violations_total).then(|| {
        format!(
            "violations truncated to max_violations={}",
            cfg.max_violations
        )
    });

    let rules_failed = results.iter().filter(|r| !r.passed()).count();
    info!(
        rules = results.len(),
        failed = rules_failed,
        violations = violations_total,
        ?verdict,
        "architecture check finished"
    );

    Ok(ArchReport {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: ToolMeta {
            name: TOOL_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        verdict,
        rules: outcomes,
        data: ArchReportData {
            profile: cfg.profile.clone(),
            fail_on: cfg.fail_on,
            classes_scanned: graph.len() as u32,
            rules_evaluated: results.len() as u32,
            rules_failed: rules_failed as u32,
            violations_total: violations_total as u32,
            violations_emitted: violations_emitted as u32,
            truncated_reason,
        },
    })
}

fn apply_policy(
    result: EvaluationResult,
    cfg: &EffectiveConfig,
) -> Result<EvaluationResult, Error> {
    let Some(policy) = cfg.rule_policy(result.description().as_str()) else {
        return Ok(result);
    };
    let mut result = result;
    if !policy.ignore.is_empty() {
        let ignored = NameMatcher::new(&policy.ignore)?;
        let before = result.violations().len();
        result = result.retain_violations(|v| !ignored.is_match(v.subject()));
        debug!(
            rule = %result.description(),
            ignored = before - result.violations().len(),
            "dropped ignored violations"
        );
    }
    if let Some(priority) = policy.priority {
        result = result.with_priority(priority);
    }
    Ok(result)
}

fn outcome(result: &EvaluationResult, emitted: usize) -> RuleOutcome {
    let rule = result.description().as_str();
    let violations = result.violations()[..emitted]
        .iter()
        .map(|v| ViolationRecord {
            message: v.message().to_string(),
            subject: v.subject().to_string(),
            location: v.location().cloned(),
            fingerprint: Some(fingerprint_for_violation(rule, v.subject(), v.message())),
        })
        .collect();
    RuleOutcome {
        rule: rule.to_string(),
        priority: result.priority(),
        passed: result.passed(),
        violations_total: result.violations().len() as u32,
        violations,
    }
}

fn compute_verdict(results: &[EvaluationResult], fail_on: Priority) -> Verdict {
    let mut failed = results.iter().filter(|r| !r.passed()).peekable();
    if failed.peek().is_none() {
        return Verdict::Pass;
    }
    if failed.any(|r| r.priority() >= fail_on) {
        return Verdict::Fail;
    }
    Verdict::Warn
}

fn compare_results(a: &EvaluationResult, b: &EvaluationResult) -> std::cmp::Ordering {
    // Ordering priority:
    // 1) priority (high -> low)
    // 2) rule description
    b.priority()
        .cmp(&a.priority())
        .then_with(|| a.description().as_str().cmp(b.description().as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conditions::{depend_on_classes_that, have, ConditionExt};
    use crate::definition::{classes, no_classes, priority, the_class};
    use crate::policy::RulePolicy;
    use crate::predicates::simple_name;
    use crate::test_support::{config, config_with_rule, foo_bar_graph};

    fn no_class_depends_on_bar() -> RuleBox {
        Box::new(no_classes().should(depend_on_classes_that(simple_name("Bar"))))
    }

    fn every_class_is_foo(p: Priority) -> RuleBox {
        Box::new(priority(p).classes().should(have(simple_name("Foo"))))
    }

    #[test]
    fn passing_rules_pass() {
        let foo_or_bar = have(simple_name("Foo")).or(have(simple_name("Bar")));
        let rules: Vec<RuleBox> = vec![Box::new(classes().should(foo_or_bar))];
        let report = check_all(&rules, &foo_bar_graph(), &config(Priority::Low, 10)).unwrap();
        assert_eq!(report.verdict, Verdict::Pass);
        assert_eq!(report.data.rules_evaluated, 1);
        assert_eq!(report.data.rules_failed, 0);
        assert_eq!(report.data.classes_scanned, 2);
        assert_eq!(report.schema, SCHEMA_REPORT_V1);
    }

    #[test]
    fn verdict_warns_below_fail_on_and_fails_at_or_above() {
        let graph = foo_bar_graph();
        let rules = vec![every_class_is_foo(Priority::Medium)];

        let warn = check_all(&rules, &graph, &config(Priority::High, 10)).unwrap();
        assert_eq!(warn.verdict, Verdict::Warn);

        let fail = check_all(&rules, &graph, &config(Priority::Medium, 10)).unwrap();
        assert_eq!(fail.verdict, Verdict::Fail);
    }

    #[test]
    fn outcomes_sorted_by_priority_then_description() {
        let rules = vec![
            every_class_is_foo(Priority::Low),
            no_class_depends_on_bar(),
            every_class_is_foo(Priority::High),
        ];
        let report = check_all(&rules, &foo_bar_graph(), &config(Priority::Low, 10)).unwrap();
        let order: Vec<Priority> = report.rules.iter().map(|r| r.priority).collect();
        assert_eq!(order, vec![Priority::High, Priority::Medium, Priority::Low]);
    }

    #[test]
    fn violations_carry_fingerprints() {
        let report = check_all(
            &[no_class_depends_on_bar()],
            &foo_bar_graph(),
            &config(Priority::Low, 10),
        )
        .unwrap();
        let outcome = &report.rules[0];
        assert!(!outcome.passed);
        assert_eq!(outcome.violations[0].subject, "app.Foo");
        let expected = fingerprint_for_violation(
            &outcome.rule,
            "app.Foo",
            "Class <app.Foo> depends on <app.Bar>",
        );
        assert_eq!(outcome.violations[0].fingerprint.as_deref(), Some(expected.as_str()));
    }

    #[test]
    fn truncates_past_max_violations() {
        let rules = vec![
            every_class_is_foo(Priority::High),
            no_class_depends_on_bar(),
        ];
        let report = check_all(&rules, &foo_bar_graph(), &config(Priority::Low, 1)).unwrap();
        assert_eq!(report.data.violations_total, 2);
        assert_eq!(report.data.violations_emitted, 1);
        assert_eq!(
            report.data.truncated_reason.as_deref(),
            Some("violations truncated to max_violations=1")
        );
        assert_eq!(report.rules[0].violations.len(), 1);
        assert!(report.rules[1].violations.is_empty());
        assert_eq!(report.rules[1].violations_total, 1);
    }

    #[test]
    fn disabled_rules_are_skipped() {
        let rule = no_class_depends_on_bar();
        let cfg = config_with_rule(rule.description().as_str(), RulePolicy::disabled());
        let report = check_all(&[rule], &foo_bar_graph(), &cfg).unwrap();
        assert_eq!(report.verdict, Verdict::Pass);
        assert!(report.rules.is_empty());
    }

    #[test]
    fn priority_override_applies() {
        let rule = no_class_depends_on_bar();
        let mut cfg = config_with_rule(
            rule.description().as_str(),
            RulePolicy::with_priority(Priority::Low),
        );
        cfg.fail_on = Priority::Medium;
        let report = check_all(&[rule], &foo_bar_graph(), &cfg).unwrap();
        assert_eq!(report.rules[0].priority, Priority::Low);
        assert_eq!(report.verdict, Verdict::Warn);
    }

    #[test]
    fn ignored_subjects_drop_violations() {
        let rule = every_class_is_foo(Priority::High);
        let mut policy = RulePolicy::enabled();
        policy.ignore = vec!["app.B*".to_string()];
        let cfg = config_with_rule(rule.description().as_str(), policy);
        let report = check_all(&[rule], &foo_bar_graph(), &cfg).unwrap();
        assert!(report.rules[0].passed);
        assert_eq!(report.verdict, Verdict::Pass);
    }

    #[test]
    fn invalid_ignore_pattern_is_an_error() {
        let rule = every_class_is_foo(Priority::High);
        let mut policy = RulePolicy::enabled();
        policy.ignore = vec!["app.[Bar".to_string()];
        let cfg = config_with_rule(rule.description().as_str(), policy);
        let err = check_all(&[rule], &foo_bar_graph(), &cfg).unwrap_err();
        assert!(matches!(err, Error::InvalidPattern { .. }));
    }

    #[test]
    fn resolution_failure_aborts_the_run() {
        let rules: Vec<RuleBox> = vec![
            no_class_depends_on_bar(),
            Box::new(the_class("app.Missing").should(have(simple_name("Missing")))),
        ];
        let err = check_all(&rules, &foo_bar_graph(), &config(Priority::Low, 10)).unwrap_err();
        assert!(matches!(err, Error::Resolution(ref r) if r.key == "app.Missing"));
    }
}
