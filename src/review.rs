use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReviewError {
    #[error("final review for {fy} was already submitted")]
    AlreadySubmitted { fy: String },
    #[error("final review for {fy} has no manager band score and comments yet")]
    AwaitingManager { fy: String },
    #[error("final review for {fy} must be marked '{decision}' first")]
    DecisionMissing { fy: String, decision: &'static str },
}

/// Final review of one employee for one fiscal year, as returned by
/// `/api/tasks/final-review`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalReview {
    #[serde(default)]
    pub fy: String,
    #[serde(default)]
    pub employee_id: String,
    #[serde(default, alias = "avgRating")]
    pub rating: f64,
    /// `None` when the API sends the `"-"` placeholder.
    #[serde(default, deserialize_with = "band_score_from_api")]
    pub band_score: Option<String>,
    #[serde(default)]
    pub manager_comments: String,
    #[serde(default)]
    pub emp_comment: String,
    #[serde(default)]
    pub agree: bool,
    #[serde(default)]
    pub disagree: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manager_finalized_on: Option<String>,
}

fn band_score_from_api<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.filter(|score| {
        let score = score.trim();
        !score.is_empty() && score != "-"
    }))
}

/// Body of the `PUT /api/tasks/final-review` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewSubmission {
    pub fy: String,
    pub employee_id: String,
    pub emp_comment: String,
    pub agree: bool,
    pub disagree: bool,
}

impl FinalReview {
    pub fn empty(fy: impl Into<String>, employee_id: impl Into<String>) -> Self {
        Self {
            fy: fy.into(),
            employee_id: employee_id.into(),
            ..Self::default()
        }
    }

    pub fn is_submitted(&self) -> bool {
        self.manager_finalized_on
            .as_deref()
            .is_some_and(|stamp| !stamp.trim().is_empty())
    }

    pub fn can_employee_respond(&self) -> bool {
        self.band_score.is_some() && !self.manager_comments.is_empty()
    }

    pub fn is_action_taken(&self) -> bool {
        self.agree || self.disagree
    }

    /// Same gate as responding; `finalize` and `report` additionally need the
    /// matching agree or disagree flag.
    pub fn can_finalize(&self) -> bool {
        self.can_employee_respond()
    }

    pub fn band_score_display(&self) -> &str {
        self.band_score.as_deref().unwrap_or("-")
    }

    fn ensure_editable(&self) -> Result<(), ReviewError> {
        if self.is_submitted() {
            return Err(ReviewError::AlreadySubmitted {
                fy: self.fy.clone(),
            });
        }
        if !self.can_employee_respond() {
            return Err(ReviewError::AwaitingManager {
                fy: self.fy.clone(),
            });
        }
        Ok(())
    }

    /// Agree and disagree are mutually exclusive: setting one clears the other.
    pub fn toggle_agree(&mut self) -> Result<(), ReviewError> {
        self.ensure_editable()?;
        self.agree = !self.agree;
        self.disagree = false;
        Ok(())
    }

    pub fn toggle_disagree(&mut self) -> Result<(), ReviewError> {
        self.ensure_editable()?;
        self.disagree = !self.disagree;
        self.agree = false;
        Ok(())
    }

    pub fn set_comment(&mut self, comment: impl Into<String>) -> Result<(), ReviewError> {
        self.ensure_editable()?;
        self.emp_comment = comment.into();
        Ok(())
    }

    /// Accept the manager's review. Requires `agree`.
    pub fn finalize(&self) -> Result<ReviewSubmission, ReviewError> {
        self.submission(true)
    }

    /// Escalate the review to the team lead. Requires `disagree`.
    pub fn report(&self) -> Result<ReviewSubmission, ReviewError> {
        self.submission(false)
    }

    fn submission(&self, agree: bool) -> Result<ReviewSubmission, ReviewError> {
        self.ensure_editable()?;
        let marked = if agree { self.agree } else { self.disagree };
        if !marked {
            return Err(ReviewError::DecisionMissing {
                fy: self.fy.clone(),
                decision: if agree { "agree" } else { "disagree" },
            });
        }
        Ok(ReviewSubmission {
            fy: self.fy.clone(),
            employee_id: self.employee_id.clone(),
            emp_comment: self.emp_comment.clone(),
            agree,
            disagree: !agree,
        })
    }
}
