// WHY: boundary verdicts come from ordered cascades; the first matching rule wins
// Rule order is load-bearing: later rules assume earlier ones did not fire.

use regex_automata::{
    dfa::{dense::DFA, Automaton},
    Input,
};
use tracing::trace;

use super::abbreviations::AbbreviationChecker;
use super::context::{ContextWindow, Mark};
use super::lexical;
use crate::error::SplitterError;

/// One or more "capital + period" groups followed by a final bare capital, e.g. "U.S.A" or "J"
const INITIALS_PATTERN: &str = r"^(?:[A-Z]\.)*[A-Z]$";

/// Outcome for a single candidate mark
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Boundary,
    NoBoundary,
}

/// Verdict together with the name of the rule that produced it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub verdict: Verdict,
    pub rule: &'static str,
}

/// Name reported when no rule in a cascade matches
pub const FALLTHROUGH_RULE: &str = "fallthrough";

type Predicate = fn(&BoundaryClassifier, &ContextWindow<'_>) -> bool;

struct Rule {
    name: &'static str,
    applies: Predicate,
    verdict: Verdict,
}

const fn rule(name: &'static str, applies: Predicate, verdict: Verdict) -> Rule {
    Rule { name, applies, verdict }
}

/// Cascade for `?` and `!`
const QUESTION_EXCLAMATION_RULES: &[Rule] = &[
    rule("end_of_paragraph", end_of_paragraph, Verdict::Boundary),
    rule("capitalized_follower", capitalized_follower, Verdict::Boundary),
    rule("quoted_follower", quoted_follower, Verdict::Boundary),
    rule("dash_then_capital", dash_then_capital, Verdict::Boundary),
    rule("bracket_token_then_capital", bracket_token_then_capital, Verdict::Boundary),
    rule("vertical_ellipsis", lone_period_follower, Verdict::Boundary),
    rule("closed_then_opening", closed_then_opening, Verdict::Boundary),
];

/// Cascade for `.`
const PERIOD_RULES: &[Rule] = &[
    rule("end_of_paragraph", end_of_paragraph, Verdict::Boundary),
    rule("quoted_follower", quoted_follower, Verdict::Boundary),
    rule("bracketed_follower", bracketed_follower, Verdict::Boundary),
    rule("bracket_token_then_dash", bracket_token_then_dash, Verdict::NoBoundary),
    rule("closing_bracket_follower", closing_bracket_follower, Verdict::Boundary),
    rule("ellipsis_run", ellipsis_run, Verdict::NoBoundary),
    rule("vertical_ellipsis", lone_period_follower, Verdict::Boundary),
    rule("quote_then_dash", quote_then_dash, Verdict::NoBoundary),
    rule("dash_then_sentence_start", dash_then_sentence_start, Verdict::Boundary),
    rule("meridiem_time_zone", meridiem_time_zone, Verdict::NoBoundary),
    rule("honorific", honorific, Verdict::NoBoundary),
    rule("quoted_prefix", quoted_prefix, Verdict::NoBoundary),
    rule("terminal_abbreviation", terminal_abbreviation, Verdict::Boundary),
    rule("initials", initials, Verdict::NoBoundary),
    rule("capitalized_follower", capitalized_follower, Verdict::Boundary),
    rule("closed_then_opening", closed_then_opening, Verdict::Boundary),
];

/// Decides whether a candidate mark ends a sentence
pub struct BoundaryClassifier {
    abbreviations: AbbreviationChecker,
    initials: DFA<Vec<u32>>,
}

impl BoundaryClassifier {
    pub fn new(abbreviations: AbbreviationChecker) -> Result<Self, SplitterError> {
        let initials = DFA::new(INITIALS_PATTERN)?;
        Ok(Self { abbreviations, initials })
    }

    pub fn abbreviations(&self) -> &AbbreviationChecker {
        &self.abbreviations
    }

    /// Run the cascade for the window's mark and report the deciding rule
    pub fn classify(&self, window: &ContextWindow<'_>) -> Decision {
        let rules = match window.mark {
            Mark::Period => PERIOD_RULES,
            Mark::Question | Mark::Exclamation => QUESTION_EXCLAMATION_RULES,
        };

        let decision = rules
            .iter()
            .find(|rule| (rule.applies)(self, window))
            .map_or(
                Decision { verdict: Verdict::NoBoundary, rule: FALLTHROUGH_RULE },
                |rule| Decision { verdict: rule.verdict, rule: rule.name },
            );

        trace!(
            mark = %window.mark.as_char(),
            rule = decision.rule,
            verdict = ?decision.verdict,
            "Classified candidate"
        );
        decision
    }

    pub fn verdict(&self, window: &ContextWindow<'_>) -> Verdict {
        self.classify(window).verdict
    }

    fn is_initials(&self, prefix: &str) -> bool {
        matches!(self.initials.try_search_fwd(&Input::new(prefix)), Ok(Some(_)))
    }
}

fn end_of_paragraph(_: &BoundaryClassifier, w: &ContextWindow<'_>) -> bool {
    w.at_paragraph_end()
}

fn capitalized_follower(_: &BoundaryClassifier, w: &ContextWindow<'_>) -> bool {
    w.suffix.is_empty() && w.plus1.is_capitalized()
}

fn quoted_follower(_: &BoundaryClassifier, w: &ContextWindow<'_>) -> bool {
    w.suffix.is_empty() && w.plus1.test(lexical::starts_with_quote)
}

fn dash_then_capital(_: &BoundaryClassifier, w: &ContextWindow<'_>) -> bool {
    w.suffix.is_empty() && w.plus1.is("--") && w.plus2.is_capitalized()
}

// Same shape as dash_then_capital, for corpora that spell a closing bracket as -RBR-
fn bracket_token_then_capital(_: &BoundaryClassifier, w: &ContextWindow<'_>) -> bool {
    w.suffix.is_empty() && w.plus1.is("-RBR-") && w.plus2.is_capitalized()
}

fn lone_period_follower(_: &BoundaryClassifier, w: &ContextWindow<'_>) -> bool {
    w.suffix.is_empty() && w.plus1.is(".")
}

fn closed_then_opening(_: &BoundaryClassifier, w: &ContextWindow<'_>) -> bool {
    w.suffix.test(lexical::is_right_end) && w.plus1.test(lexical::is_left_start)
}

fn bracketed_follower(_: &BoundaryClassifier, w: &ContextWindow<'_>) -> bool {
    w.suffix.is_empty() && w.plus1.test(lexical::starts_with_left_paren)
}

fn bracket_token_then_dash(_: &BoundaryClassifier, w: &ContextWindow<'_>) -> bool {
    w.suffix.is_empty() && w.plus1.is("-RBR-") && w.plus2.is("--")
}

fn closing_bracket_follower(_: &BoundaryClassifier, w: &ContextWindow<'_>) -> bool {
    w.suffix.is_empty() && w.plus1.test(lexical::is_right_paren)
}

// A bare "." followed by another bare "." is inside a run of dots
fn ellipsis_run(_: &BoundaryClassifier, w: &ContextWindow<'_>) -> bool {
    w.prefix.is_empty() && w.suffix.is_empty() && w.plus1.is(".")
}

fn quote_then_dash(_: &BoundaryClassifier, w: &ContextWindow<'_>) -> bool {
    w.suffix.is_empty()
        && w.plus1.is("--")
        && w.plus2.is_capitalized()
        && w.prefix.test(lexical::ends_in_quote)
}

fn dash_then_sentence_start(_: &BoundaryClassifier, w: &ContextWindow<'_>) -> bool {
    w.suffix.is_empty()
        && w.plus1.is("--")
        && (w.plus2.is_capitalized() || w.plus2.test(lexical::starts_with_quote))
}

// "3 p.m. EST Monday" stays one sentence
fn meridiem_time_zone(c: &BoundaryClassifier, w: &ContextWindow<'_>) -> bool {
    w.suffix.is_empty()
        && w.plus1.is_capitalized()
        && w.prefix.test(lexical::is_meridiem)
        && w.plus1.word().is_some_and(|word| c.abbreviations.is_time_zone(word))
}

fn honorific(c: &BoundaryClassifier, w: &ContextWindow<'_>) -> bool {
    w.suffix.is_empty()
        && w.plus1.is_capitalized()
        && w.prefix.text().is_some_and(|stem| c.abbreviations.is_honorific_stem(stem))
}

fn quoted_prefix(_: &BoundaryClassifier, w: &ContextWindow<'_>) -> bool {
    w.suffix.is_empty() && w.plus1.is_capitalized() && w.prefix.test(lexical::starts_with_quote)
}

fn terminal_abbreviation(c: &BoundaryClassifier, w: &ContextWindow<'_>) -> bool {
    w.suffix.is_empty()
        && w.plus1.is_capitalized()
        && w.prefix.text().is_some_and(|prefix| c.abbreviations.is_terminal(prefix))
}

fn initials(c: &BoundaryClassifier, w: &ContextWindow<'_>) -> bool {
    w.suffix.is_empty()
        && w.plus1.is_capitalized()
        && w.prefix.text().is_some_and(|prefix| c.is_initials(prefix))
}
