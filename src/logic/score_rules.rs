//! Volleyball scoring law: is a submitted result internally consistent?
//!
//! Checks run in a fixed order so a single bad set always yields the error
//! for that set:
//!
//! 1. the sets score is a legal final score (or the technical-defeat score),
//! 2. every set on its own (required sets 1-3, optional set 4, deciding set 5),
//! 3. unplayed sets form a contiguous suffix,
//! 4. the sets score equals the tally of set winners, with no set played
//!    after the match was already decided.

use crate::config::{ScoringConfig, FIFTH_SET_INDEX, REQUIRED_SETS_COUNT};
use crate::error::ScoreError;
use crate::models::{GameResult, Score, Side};

/// Validate a full result against the scoring rules.
pub fn validate(result: &GameResult, config: &ScoringConfig) -> Result<(), ScoreError> {
    validate_sets_score(&result.game_score, config)?;
    for (index, set) in result.set_scores.iter().enumerate() {
        validate_set(index, set, config)?;
    }
    validate_unplayed_suffix(&result.set_scores)?;
    validate_sets_tally(result, config)
}

/// Sets score must be e.g. 3:0, 3:1, 3:2 (or mirrored); technical defeats only 3:0 / 0:3.
pub fn validate_sets_score(score: &Score, config: &ScoringConfig) -> Result<(), ScoreError> {
    if score.is_technical_defeat {
        let (winner, loser) = (
            config.technical_defeat_sets_winner,
            config.technical_defeat_sets_loser,
        );
        if score.max() == winner && score.min() == loser {
            return Ok(());
        }
        return Err(ScoreError::TechnicalDefeatSetsScoreInvalid { winner, loser });
    }
    if score.max() == config.sets_to_win && score.min() < config.sets_to_win {
        Ok(())
    } else {
        Err(ScoreError::SetsScoreInvalid {
            home: score.home,
            away: score.away,
            sets_to_win: config.sets_to_win,
        })
    }
}

/// Validate one set by its 0-based position in the result.
pub fn validate_set(index: usize, set: &Score, config: &ScoringConfig) -> Result<(), ScoreError> {
    if set.is_technical_defeat {
        return validate_technical_defeat_set(index, set, config);
    }
    let min_points = config.set_points_to_win_at(index);
    let min_margin = config.set_min_margin;
    if index < REQUIRED_SETS_COUNT {
        if is_set_won(set, min_points, min_margin) {
            return Ok(());
        }
        return Err(ScoreError::RequiredSetInvalid {
            set: index,
            min_points,
            min_margin,
        });
    }
    if set.is_unplayed() || is_set_won(set, min_points, min_margin) {
        return Ok(());
    }
    if index == FIFTH_SET_INDEX {
        Err(ScoreError::FifthSetInvalid {
            min_points,
            min_margin,
        })
    } else {
        Err(ScoreError::OptionalSetInvalid {
            set: index,
            min_points,
            min_margin,
        })
    }
}

fn validate_technical_defeat_set(
    index: usize,
    set: &Score,
    config: &ScoringConfig,
) -> Result<(), ScoreError> {
    let (winner, loser) = (
        config.technical_defeat_set_winner,
        config.technical_defeat_set_loser,
    );
    if set.max() == winner && set.min() == loser && winner != loser {
        Ok(())
    } else {
        Err(ScoreError::TechnicalDefeatSetInvalid {
            set: index,
            winner,
            loser,
        })
    }
}

/// A set is won by reaching `min_points` with a `min_margin` lead; past
/// `min_points` the play continues until the lead is exactly `min_margin`.
pub fn is_set_won(set: &Score, min_points: u16, min_margin: u16) -> bool {
    let (winner, loser) = (set.max(), set.min());
    let lead = winner - loser;
    (winner == min_points && lead >= min_margin) || (winner > min_points && lead == min_margin)
}

/// Once a set is unplayed every following set must be unplayed too.
pub fn validate_unplayed_suffix(sets: &[Score]) -> Result<(), ScoreError> {
    let first_unplayed = sets.iter().position(Score::is_unplayed);
    if let Some(first) = first_unplayed {
        if let Some(offset) = sets[first..].iter().position(|s| !s.is_unplayed()) {
            return Err(ScoreError::UnplayedSetsNotContiguous {
                set: first + offset,
            });
        }
    }
    Ok(())
}

/// Sets score must equal the number of sets each side won.
pub fn validate_sets_tally(result: &GameResult, config: &ScoringConfig) -> Result<(), ScoreError> {
    let (mut won_home, mut won_away) = (0u16, 0u16);
    for (index, set) in result.set_scores.iter().enumerate() {
        if set.is_unplayed() {
            continue;
        }
        if won_home >= config.sets_to_win || won_away >= config.sets_to_win {
            return Err(ScoreError::SetAfterMatchDecided { set: index });
        }
        match set.winner() {
            Some(Side::Home) => won_home += 1,
            Some(Side::Away) => won_away += 1,
            None => {}
        }
    }
    let score = &result.game_score;
    if score.home == won_home && score.away == won_away {
        Ok(())
    } else {
        Err(ScoreError::AggregateMismatch {
            home: score.home,
            away: score.away,
            won_home,
            won_away,
        })
    }
}
