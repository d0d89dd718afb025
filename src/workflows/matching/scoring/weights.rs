use super::super::domain::{MatchWeights, ScoreBreakdown};

/// Job weights normalized so the three dimensions sum to one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedWeights {
    pub skill_match: f64,
    pub experience: f64,
    pub project_quality: f64,
}

/// Raised when a job carries weights the aggregator cannot use.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WeightError {
    #[error(
        "match weights must be non-negative \
         (skillMatch={skill_match}, experience={experience}, projectQuality={project_quality})"
    )]
    Negative {
        skill_match: f64,
        experience: f64,
        project_quality: f64,
    },
}

impl NormalizedWeights {
    /// Validate and normalize raw job weights. All-zero weights fall back to
    /// equal thirds rather than dividing by zero; negative weights are an
    /// input error that fails the run.
    pub fn from_weights(weights: &MatchWeights) -> Result<Self, WeightError> {
        let MatchWeights {
            skill_match,
            experience,
            project_quality,
        } = *weights;

        if skill_match < 0.0 || experience < 0.0 || project_quality < 0.0 {
            return Err(WeightError::Negative {
                skill_match,
                experience,
                project_quality,
            });
        }

        let sum = skill_match + experience + project_quality;
        if sum == 0.0 {
            let third = 1.0 / 3.0;
            return Ok(Self {
                skill_match: third,
                experience: third,
                project_quality: third,
            });
        }

        Ok(Self {
            skill_match: skill_match / sum,
            experience: experience / sum,
            project_quality: project_quality / sum,
        })
    }

    /// Combine sub-scores into the overall score: weighted sum, rounded,
    /// clamped to [0, 100]. Pure.
    pub fn aggregate(&self, breakdown: &ScoreBreakdown) -> u8 {
        let weighted = breakdown.skill_score * self.skill_match
            + breakdown.experience_score * self.experience
            + breakdown.project_score * self.project_quality;
        weighted.round().clamp(0.0, 100.0) as u8
    }
}
