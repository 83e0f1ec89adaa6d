//! Grade computation: per-subject final scores, letter grades, per-kind
//! class ranking averages and report-card statistics. Everything here is
//! pure; the repository layer feeds it rows and persists the results.

use uuid::Uuid;

use crate::entities::sea_orm_active_enums::{AssessmentKind, CalculationMethod};

/// Calculation rules in effect for one school: the active grade
/// configuration, or the synthesized default when none is stored.
#[derive(Debug, Clone, PartialEq)]
pub struct Policy {
    pub method: CalculationMethod,
    pub weight_qa1: f64,
    pub weight_qa2: f64,
    pub weight_end_of_term: f64,
    pub pass_mark: f64,
}

impl Default for Policy {
    /// End-of-term only, pass mark 50. Not persisted anywhere.
    fn default() -> Self {
        Self {
            method: CalculationMethod::EndOfTermOnly,
            weight_qa1: 0.0,
            weight_qa2: 0.0,
            weight_end_of_term: 100.0,
            pass_mark: 50.0,
        }
    }
}

/// One raw assessment row, already joined to its subject name.
#[derive(Debug, Clone, PartialEq)]
pub struct AssessmentRow {
    pub subject: String,
    pub kind: AssessmentKind,
    pub score: i32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScoreTriple {
    pub qa1: f64,
    pub qa2: f64,
    pub end_of_term: f64,
}

/// Which assessment kinds have at least one positive score across the
/// student's full assessment list for the term.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TermPresence {
    pub has_qa1: bool,
    pub has_qa2: bool,
    pub has_end_of_term: bool,
}

pub fn term_presence(rows: &[AssessmentRow]) -> TermPresence {
    TermPresence {
        has_qa1: rows
            .iter()
            .any(|r| r.kind == AssessmentKind::Qa1 && r.score > 0),
        has_qa2: rows
            .iter()
            .any(|r| r.kind == AssessmentKind::Qa2 && r.score > 0),
        has_end_of_term: rows
            .iter()
            .any(|r| r.kind == AssessmentKind::EndOfTerm && r.score > 0),
    }
}

/// Applies the policy's calculation method to one subject's triple.
/// `average_all` divides by 3 no matter how many scores were entered;
/// missing scores dilute the average rather than being excluded.
pub fn final_score(triple: ScoreTriple, policy: &Policy) -> f64 {
    match policy.method {
        CalculationMethod::AverageAll => (triple.qa1 + triple.qa2 + triple.end_of_term) / 3.0,
        CalculationMethod::EndOfTermOnly => triple.end_of_term,
        CalculationMethod::WeightedAverage => {
            (triple.qa1 * policy.weight_qa1
                + triple.qa2 * policy.weight_qa2
                + triple.end_of_term * policy.weight_end_of_term)
                / 100.0
        }
    }
}

/// Final score with the partial-term override: while a term is in progress
/// (some QA score entered, no end-of-term yet) the subject reports the
/// end-of-term score, i.e. 0, instead of a misleading interim average.
pub fn final_score_in_term(triple: ScoreTriple, policy: &Policy, presence: TermPresence) -> f64 {
    if (presence.has_qa1 || presence.has_qa2) && !presence.has_end_of_term {
        return triple.end_of_term;
    }

    final_score(triple, policy)
}

/// A/B/C bands are fixed; only the D/F boundary follows the pass mark.
pub fn letter_grade(score: f64, policy: &Policy) -> &'static str {
    if score >= 80.0 {
        "A"
    } else if score >= 70.0 {
        "B"
    } else if score >= 60.0 {
        "C"
    } else if score >= policy.pass_mark {
        "D"
    } else {
        "F"
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubjectTriple {
    pub name: String,
    pub scores: ScoreTriple,
}

/// Groups assessment rows into one triple per subject, keeping first-seen
/// order. Only subjects with at least one row appear; absent kinds stay 0.
pub fn subject_triples(rows: &[AssessmentRow]) -> Vec<SubjectTriple> {
    let mut subjects: Vec<SubjectTriple> = Vec::new();

    for row in rows {
        let index = match subjects.iter().position(|s| s.name == row.subject) {
            Some(index) => index,
            None => {
                subjects.push(SubjectTriple {
                    name: row.subject.clone(),
                    scores: ScoreTriple::default(),
                });
                subjects.len() - 1
            }
        };
        let entry = &mut subjects[index];

        match row.kind {
            AssessmentKind::Qa1 => entry.scores.qa1 = row.score as f64,
            AssessmentKind::Qa2 => entry.scores.qa2 = row.score as f64,
            AssessmentKind::EndOfTerm => entry.scores.end_of_term = row.score as f64,
        }
    }

    subjects
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubjectScores {
    pub name: String,
    pub qa1: f64,
    pub qa2: f64,
    pub end_of_term: f64,
    pub final_score: f64,
    pub grade: &'static str,
}

/// Scores every subject under the policy. `presence` is supplied when the
/// caller has the student's full assessment list (report-card payload);
/// class-results views pass `None` and the partial-term override never
/// fires there.
pub fn score_subjects(
    triples: &[SubjectTriple],
    policy: &Policy,
    presence: Option<TermPresence>,
) -> Vec<SubjectScores> {
    triples
        .iter()
        .map(|subject| {
            let score = match presence {
                Some(p) => final_score_in_term(subject.scores, policy, p),
                None => final_score(subject.scores, policy),
            };
            SubjectScores {
                name: subject.name.clone(),
                qa1: subject.scores.qa1,
                qa2: subject.scores.qa2,
                end_of_term: subject.scores.end_of_term,
                final_score: score,
                grade: letter_grade(score, policy),
            }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct KindAverages {
    pub qa1: f64,
    pub qa2: f64,
    pub end_of_term: f64,
}

/// Report-card statistics: per-kind mean across all of the student's
/// subjects, zeros included (same dilution policy as `average_all`).
pub fn term_averages(triples: &[SubjectTriple]) -> KindAverages {
    if triples.is_empty() {
        return KindAverages::default();
    }

    let count = triples.len() as f64;
    KindAverages {
        qa1: triples.iter().map(|s| s.scores.qa1).sum::<f64>() / count,
        qa2: triples.iter().map(|s| s.scores.qa2).sum::<f64>() / count,
        end_of_term: triples.iter().map(|s| s.scores.end_of_term).sum::<f64>() / count,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct KindStat {
    pub term_average: f64,
    pub grade: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssessmentStats {
    pub qa1: KindStat,
    pub qa2: KindStat,
    pub end_of_term: KindStat,
    pub overall_average: f64,
}

/// The overall average re-enters the final-score calculator with the three
/// per-kind means as a pseudo-triple, so one code path owns "final score
/// from a triple". Under a weighted policy this is not the plain mean of
/// the three values.
pub fn assessment_stats(triples: &[SubjectTriple], policy: &Policy) -> AssessmentStats {
    let means = term_averages(triples);

    let overall = final_score(
        ScoreTriple {
            qa1: means.qa1,
            qa2: means.qa2,
            end_of_term: means.end_of_term,
        },
        policy,
    );

    AssessmentStats {
        qa1: KindStat {
            term_average: means.qa1,
            grade: letter_grade(means.qa1, policy),
        },
        qa2: KindStat {
            term_average: means.qa2,
            grade: letter_grade(means.qa2, policy),
        },
        end_of_term: KindStat {
            term_average: means.end_of_term,
            grade: letter_grade(means.end_of_term, policy),
        },
        overall_average: overall,
    }
}

/// Ranking input: per-kind averages over the subjects with a positive score
/// for that kind. Distinct from the display-side final score on purpose.
pub fn ranking_averages(rows: &[(AssessmentKind, i32)]) -> KindAverages {
    fn positive_mean(rows: &[(AssessmentKind, i32)], kind: AssessmentKind) -> f64 {
        let scores: Vec<i32> = rows
            .iter()
            .filter(|(k, score)| *k == kind && *score > 0)
            .map(|(_, score)| *score)
            .collect();

        if scores.is_empty() {
            0.0
        } else {
            scores.iter().sum::<i32>() as f64 / scores.len() as f64
        }
    }

    KindAverages {
        qa1: positive_mean(rows, AssessmentKind::Qa1),
        qa2: positive_mean(rows, AssessmentKind::Qa2),
        end_of_term: positive_mean(rows, AssessmentKind::EndOfTerm),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StudentKindAverages {
    pub student_id: Uuid,
    pub averages: KindAverages,
}

/// Students with a zero average are not ranked; the rest sort descending.
/// The sort is stable, so ties keep roster order.
pub fn ranking_order<F>(results: &[StudentKindAverages], pick: F) -> Vec<Uuid>
where
    F: Fn(&KindAverages) -> f64,
{
    let mut ranked: Vec<(Uuid, f64)> = results
        .iter()
        .map(|r| (r.student_id, pick(&r.averages)))
        .filter(|(_, avg)| *avg > 0.0)
        .collect();

    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    ranked.into_iter().map(|(id, _)| id).collect()
}

/// 1-based position in the ranking, or 0 for "not ranked".
pub fn rank_of(order: &[Uuid], student_id: Uuid) -> i32 {
    order
        .iter()
        .position(|id| *id == student_id)
        .map(|idx| idx as i32 + 1)
        .unwrap_or(0)
}

/// Cached report-card overall: mean of per-subject final scores over the
/// subjects that scored above zero. Used by the recompute pass that runs
/// when a grade configuration is activated.
pub fn overall_average(triples: &[SubjectTriple], policy: &Policy) -> f64 {
    let positive: Vec<f64> = triples
        .iter()
        .map(|subject| final_score(subject.scores, policy))
        .filter(|score| *score > 0.0)
        .collect();

    if positive.is_empty() {
        0.0
    } else {
        positive.iter().sum::<f64>() / positive.len() as f64
    }
}

/// One-decimal rounding applied to term averages at the response boundary.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weighted_policy() -> Policy {
        Policy {
            method: CalculationMethod::WeightedAverage,
            weight_qa1: 30.0,
            weight_qa2: 30.0,
            weight_end_of_term: 40.0,
            pass_mark: 50.0,
        }
    }

    fn average_policy() -> Policy {
        Policy {
            method: CalculationMethod::AverageAll,
            weight_qa1: 0.0,
            weight_qa2: 0.0,
            weight_end_of_term: 0.0,
            pass_mark: 50.0,
        }
    }

    fn row(subject: &str, kind: AssessmentKind, score: i32) -> AssessmentRow {
        AssessmentRow {
            subject: subject.to_string(),
            kind,
            score,
        }
    }

    #[test]
    fn test_final_score_average_all_divides_by_three() {
        let triple = ScoreTriple {
            qa1: 50.0,
            qa2: 60.0,
            end_of_term: 70.0,
        };
        assert_eq!(final_score(triple, &average_policy()), 60.0);

        // Zeros dilute rather than shrink the denominator
        let partial = ScoreTriple {
            qa1: 0.0,
            qa2: 0.0,
            end_of_term: 90.0,
        };
        assert_eq!(final_score(partial, &average_policy()), 30.0);
    }

    #[test]
    fn test_final_score_end_of_term_only() {
        let triple = ScoreTriple {
            qa1: 95.0,
            qa2: 95.0,
            end_of_term: 42.0,
        };
        assert_eq!(final_score(triple, &Policy::default()), 42.0);
    }

    #[test]
    fn test_final_score_weighted_is_convex_combination() {
        let triple = ScoreTriple {
            qa1: 60.0,
            qa2: 70.0,
            end_of_term: 80.0,
        };
        let score = final_score(triple, &weighted_policy());
        assert_eq!(score, 71.0);
        assert!(score >= 60.0 && score <= 80.0);
    }

    #[test]
    fn test_override_returns_zero_while_term_in_progress() {
        let triple = ScoreTriple {
            qa1: 70.0,
            qa2: 80.0,
            end_of_term: 0.0,
        };
        let presence = TermPresence {
            has_qa1: true,
            has_qa2: true,
            has_end_of_term: false,
        };

        // Regardless of calculation method
        assert_eq!(final_score_in_term(triple, &average_policy(), presence), 0.0);
        assert_eq!(final_score_in_term(triple, &weighted_policy(), presence), 0.0);
        assert_eq!(final_score_in_term(triple, &Policy::default(), presence), 0.0);
    }

    #[test]
    fn test_override_does_not_fire_once_end_of_term_exists() {
        let triple = ScoreTriple {
            qa1: 70.0,
            qa2: 80.0,
            end_of_term: 90.0,
        };
        let presence = TermPresence {
            has_qa1: true,
            has_qa2: true,
            has_end_of_term: true,
        };
        assert_eq!(final_score_in_term(triple, &average_policy(), presence), 80.0);
    }

    #[test]
    fn test_override_does_not_fire_without_qa_scores() {
        let triple = ScoreTriple {
            qa1: 0.0,
            qa2: 0.0,
            end_of_term: 90.0,
        };
        let presence = TermPresence {
            has_qa1: false,
            has_qa2: false,
            has_end_of_term: true,
        };
        assert_eq!(final_score_in_term(triple, &Policy::default(), presence), 90.0);
        assert_eq!(final_score_in_term(triple, &average_policy(), presence), 30.0);
    }

    #[test]
    fn test_letter_grade_boundaries() {
        let policy = Policy::default();
        assert_eq!(letter_grade(80.0, &policy), "A");
        assert_eq!(letter_grade(79.99, &policy), "B");
        assert_eq!(letter_grade(70.0, &policy), "B");
        assert_eq!(letter_grade(60.0, &policy), "C");
        assert_eq!(letter_grade(50.0, &policy), "D");
        assert_eq!(letter_grade(49.0, &policy), "F");
    }

    #[test]
    fn test_letter_grade_pass_mark_moves_only_d_boundary() {
        let policy = Policy {
            pass_mark: 40.0,
            ..Policy::default()
        };
        assert_eq!(letter_grade(45.0, &policy), "D");
        assert_eq!(letter_grade(39.9, &policy), "F");
        assert_eq!(letter_grade(60.0, &policy), "C");
    }

    #[test]
    fn test_subject_triples_groups_by_subject_in_first_seen_order() {
        let rows = vec![
            row("Math", AssessmentKind::Qa1, 70),
            row("English", AssessmentKind::EndOfTerm, 65),
            row("Math", AssessmentKind::Qa2, 80),
        ];

        let triples = subject_triples(&rows);
        assert_eq!(triples.len(), 2);
        assert_eq!(triples[0].name, "Math");
        assert_eq!(
            triples[0].scores,
            ScoreTriple {
                qa1: 70.0,
                qa2: 80.0,
                end_of_term: 0.0
            }
        );
        assert_eq!(triples[1].name, "English");
        assert_eq!(triples[1].scores.end_of_term, 65.0);
    }

    #[test]
    fn test_score_subjects_with_override_context() {
        // Term in progress: QA1=70, QA2=80, no end-of-term entry, weighted
        // 30/30/40. The weights alone would yield 45; the override forces
        // 0 and grade F.
        let rows = vec![
            row("Math", AssessmentKind::Qa1, 70),
            row("Math", AssessmentKind::Qa2, 80),
        ];
        let triples = subject_triples(&rows);
        let scored = score_subjects(&triples, &weighted_policy(), Some(term_presence(&rows)));

        assert_eq!(scored.len(), 1);
        assert_eq!(scored[0].final_score, 0.0);
        assert_eq!(scored[0].grade, "F");
    }

    #[test]
    fn test_score_subjects_without_context_skips_override() {
        let rows = vec![
            row("Math", AssessmentKind::Qa1, 70),
            row("Math", AssessmentKind::Qa2, 80),
        ];
        let triples = subject_triples(&rows);
        let scored = score_subjects(&triples, &weighted_policy(), None);

        assert_eq!(scored[0].final_score, 45.0);
        assert_eq!(scored[0].grade, "F");
    }

    #[test]
    fn test_term_averages_include_zero_subjects() {
        let triples = subject_triples(&[
            row("Math", AssessmentKind::Qa1, 80),
            row("English", AssessmentKind::Qa2, 60),
        ]);

        let means = term_averages(&triples);
        assert_eq!(means.qa1, 40.0);
        assert_eq!(means.qa2, 30.0);
        assert_eq!(means.end_of_term, 0.0);
    }

    #[test]
    fn test_assessment_stats_overall_reuses_calculator() {
        let triples = subject_triples(&[
            row("Math", AssessmentKind::Qa1, 80),
            row("Math", AssessmentKind::Qa2, 60),
            row("Math", AssessmentKind::EndOfTerm, 70),
            row("English", AssessmentKind::Qa1, 40),
        ]);

        // Per-kind means over both subjects: qa1 60, qa2 30, end-of-term 35
        let stats = assessment_stats(&triples, &weighted_policy());
        assert_eq!(stats.qa1.term_average, 60.0);
        assert_eq!(stats.qa1.grade, "C");

        // Weighted recombination of the means, not their plain mean
        assert_eq!(
            stats.overall_average,
            (60.0 * 30.0 + 30.0 * 30.0 + 35.0 * 40.0) / 100.0
        );
        assert!(stats.overall_average != (60.0 + 30.0 + 35.0) / 3.0);

        let stats = assessment_stats(&triples, &average_policy());
        assert_eq!(stats.overall_average, (60.0 + 30.0 + 35.0) / 3.0);
    }

    #[test]
    fn test_ranking_averages_skip_non_positive_scores() {
        let rows = vec![
            (AssessmentKind::Qa1, 80),
            (AssessmentKind::Qa1, 60),
            (AssessmentKind::EndOfTerm, 90),
        ];

        let averages = ranking_averages(&rows);
        assert_eq!(averages.qa1, 70.0);
        assert_eq!(averages.qa2, 0.0);
        assert_eq!(averages.end_of_term, 90.0);
    }

    #[test]
    fn test_ranking_order_and_rank_of() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let c = Uuid::new_v4();

        let results = vec![
            StudentKindAverages {
                student_id: a,
                averages: KindAverages {
                    end_of_term: 90.0,
                    ..Default::default()
                },
            },
            StudentKindAverages {
                student_id: b,
                averages: KindAverages::default(),
            },
            StudentKindAverages {
                student_id: c,
                averages: KindAverages {
                    end_of_term: 70.0,
                    ..Default::default()
                },
            },
        ];

        let order = ranking_order(&results, |avg| avg.end_of_term);
        assert_eq!(order, vec![a, c]);
        assert_eq!(rank_of(&order, a), 1);
        assert_eq!(rank_of(&order, c), 2);
        assert_eq!(rank_of(&order, b), 0);
    }

    #[test]
    fn test_overall_average_ignores_zero_final_scores() {
        let triples = subject_triples(&[
            row("Math", AssessmentKind::EndOfTerm, 80),
            row("English", AssessmentKind::EndOfTerm, 60),
            row("Science", AssessmentKind::Qa1, 50),
        ]);

        // end_of_term_only: Science's final score is 0 and drops out
        assert_eq!(overall_average(&triples, &Policy::default()), 70.0);
        assert_eq!(overall_average(&[], &Policy::default()), 0.0);
    }

    #[test]
    fn test_round1() {
        assert_eq!(round1(66.666666), 66.7);
        assert_eq!(round1(70.0), 70.0);
        assert_eq!(round1(45.04), 45.0);
    }
}
