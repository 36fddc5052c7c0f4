//! Declarative scoring rules and the pure evaluator.
//!
//! Criteria are data, not branching logic: each `Rule` pairs a predicate
//! over the repository summary with a signed weight and a static trace
//! message. Adding or removing a criterion never touches control flow.

use crate::summary::RepositorySummary;

/// Predicate over a repository summary. Plain function pointers keep the
/// rule table `Copy`-cheap and trivially shareable across requests.
pub type Predicate = fn(&RepositorySummary) -> bool;

/// One scoring criterion: if `predicate` holds, `weight` is added to the
/// score and `message` is appended to the trace.
///
/// Messages are static per rule so that two repositories matching the same
/// rules produce byte-identical traces (and therefore identical digests).
#[derive(Clone, Copy)]
pub struct Rule {
    predicate: Predicate,
    weight: i64,
    message: &'static str,
}

impl Rule {
    pub const fn new(predicate: Predicate, weight: i64, message: &'static str) -> Self {
        Rule {
            predicate,
            weight,
            message,
        }
    }

    /// Whether this rule matches the given summary.
    pub fn matches(&self, summary: &RepositorySummary) -> bool {
        (self.predicate)(summary)
    }

    pub fn weight(&self) -> i64 {
        self.weight
    }

    pub fn message(&self) -> &'static str {
        self.message
    }
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("weight", &self.weight)
            .field("message", &self.message)
            .finish()
    }
}

/// Outcome of evaluating a summary against a rule table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    /// Sum of matched rule weights. Unbounded; negative totals are legal.
    pub score: i64,

    /// Messages of matched rules, in table-declaration order.
    pub trace: Vec<String>,
}

/// Ordered, read-only rule table. Built once at startup and shared by
/// reference across all in-flight evaluations.
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new(rules: Vec<Rule>) -> Self {
        RuleSet { rules }
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Evaluate a summary against the table.
    ///
    /// Deterministic and pure: iterates rules in declaration order,
    /// accumulating weights and trace messages of matched rules. Never
    /// fails; a rule over absent optional metadata simply does not match.
    pub fn evaluate(&self, summary: &RepositorySummary) -> Evaluation {
        let mut score = 0i64;
        let mut trace = Vec::new();

        for rule in &self.rules {
            if rule.matches(summary) {
                score += rule.weight;
                trace.push(rule.message.to_string());
            }
        }

        Evaluation { score, trace }
    }

    /// The standard ProofForge scoring table.
    ///
    /// Star tiers, test presence, commit activity, issue hygiene, language
    /// detection, and codebase size. At most one rule per tier group can
    /// match a given summary.
    pub fn standard() -> Self {
        RuleSet::new(vec![
            // Stars
            Rule::new(|s| s.star_count >= 1000, 50, "high star count (1000+): +50"),
            Rule::new(
                |s| (100..1000).contains(&s.star_count),
                30,
                "good star count (100+): +30",
            ),
            Rule::new(
                |s| (10..100).contains(&s.star_count),
                15,
                "some stars (10+): +15",
            ),
            Rule::new(|s| s.star_count < 10, 0, "low star count: +0"),
            // Tests
            Rule::new(|s| s.has_tests, 25, "has tests: +25"),
            Rule::new(|s| !s.has_tests, 0, "no tests found: +0"),
            // Commit activity
            Rule::new(
                |s| s.commit_count >= 100,
                20,
                "high activity (100+ commits): +20",
            ),
            Rule::new(
                |s| (10..100).contains(&s.commit_count),
                10,
                "some activity (10+ commits): +10",
            ),
            Rule::new(|s| s.commit_count < 10, 0, "low activity: +0"),
            // Issue hygiene
            Rule::new(|s| s.open_issue_count == 0, 15, "no open issues: +15"),
            Rule::new(
                |s| (1..=10).contains(&s.open_issue_count),
                5,
                "few open issues (10 or fewer): +5",
            ),
            Rule::new(|s| s.open_issue_count > 10, 0, "many open issues: +0"),
            // Language
            Rule::new(
                |s| s.language.is_some(),
                5,
                "primary language identified: +5",
            ),
            // Codebase size
            Rule::new(
                |s| s.size_kb.is_some_and(|kb| kb > 10_000),
                10,
                "large codebase (10000+ KB): +10",
            ),
            Rule::new(
                |s| s.size_kb.is_some_and(|kb| kb > 1_000 && kb <= 10_000),
                5,
                "medium codebase (1000+ KB): +5",
            ),
        ])
    }
}
