//! Offline text generator: a fixed answer for tests, or canned interpretations served when
//! every upstream model is down.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use super::TextGenerator;
use crate::error::DreamError;

const CANNED: &[&str] = &[
    "\
# Dream Interpretation

## 1. Overall Meaning
Your dream reflects a period of uncertainty: something that used to guide you feels less reliable, and part of you is searching for a new direction.

## 2. Key Symbols
- **Forest**: The unconscious mind and unfamiliar territory in your life
- **Running**: A wish to get away from a pressure or responsibility you are facing
- **Darkness**: Uncertainty, or parts of yourself you have not yet acknowledged

## 3. Psychological Insights
The dream suggests you started something with energy and clarity and now feel that the guidance you relied on has faded. Your mind is rehearsing how to cope without it.

## 4. Emotional Themes
Anxiety and vulnerability, with an undercurrent of determination to keep moving.

## 5. Actionable Advice
Name the situation in waking life that feels unclear. Write down one past moment when you found your way through uncertainty, and pick one small, concrete step you can take this week.
",
    "\
# Dream Interpretation

## 1. Overall Meaning
Your dream points to a transition. You are leaving a familiar state behind and are not yet sure what comes next.

## 2. Key Symbols
- **Door**: A threshold, opportunity, or choice you are approaching
- **Water**: Emotions moving beneath the surface
- **Light**: Insight and the wish for clarity

## 3. Psychological Insights
Transitions often bring mixed feelings. The dream gives shape to both your hope about what is ahead and your reluctance to let go of what you know.

## 4. Emotional Themes
Anticipation mixed with nervousness, and a quiet sense of possibility.

## 5. Actionable Advice
Give yourself permission to feel both excitement and fear. Spend ten minutes journaling about what you want to carry with you into the next chapter and what you are ready to leave behind.
",
];

/// Returns a fixed answer, or cycles through canned interpretations.
pub struct MockTextGenerator {
    responses: Vec<String>,
    next: AtomicUsize,
}

impl MockTextGenerator {
    /// Always answers `response`.
    pub fn fixed(response: impl Into<String>) -> Self {
        Self {
            responses: vec![response.into()],
            next: AtomicUsize::new(0),
        }
    }

    /// Canned markdown interpretations, returned round-robin.
    pub fn canned() -> Self {
        Self {
            responses: CANNED.iter().map(|s| s.to_string()).collect(),
            next: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl TextGenerator for MockTextGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String, DreamError> {
        if self.responses.is_empty() {
            return Err(DreamError::UpstreamUnavailable("mock has no responses".into()));
        }
        let i = self.next.fetch_add(1, Ordering::Relaxed) % self.responses.len();
        Ok(self.responses[i].clone())
    }

    fn model_name(&self) -> &str {
        "mock"
    }
}
