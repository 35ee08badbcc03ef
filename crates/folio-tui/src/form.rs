use std::time::{Duration, Instant};

use folio_schema::ContactMessage;

/// How long a sent/failed submit state stays on the button before it
/// clears back to idle.
pub const STATUS_CLEAR_AFTER: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Message,
}

impl Field {
    pub fn next(self) -> Self {
        match self {
            Self::Name => Self::Email,
            Self::Email => Self::Message,
            Self::Message => Self::Name,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Name => Self::Message,
            Self::Email => Self::Name,
            Self::Message => Self::Email,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitStatus {
    Idle,
    Sending,
    Sent,
    Failed,
}

/// Contact-form state. Inputs are locked while a submission is in flight or
/// just succeeded; a failed submission is retryable and its error state
/// auto-clears.
#[derive(Debug)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
    pub focus: Field,
    pub editing: bool,
    status: SubmitStatus,
    status_since: Option<Instant>,
}

impl Default for ContactForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            message: String::new(),
            focus: Field::Name,
            editing: false,
            status: SubmitStatus::Idle,
            status_since: None,
        }
    }
}

impl ContactForm {
    pub fn status(&self) -> SubmitStatus {
        self.status
    }

    pub fn locked(&self) -> bool {
        matches!(self.status, SubmitStatus::Sending | SubmitStatus::Sent)
    }

    pub fn is_complete(&self) -> bool {
        !self.name.trim().is_empty()
            && !self.email.trim().is_empty()
            && !self.message.trim().is_empty()
    }

    fn field_mut(&mut self) -> &mut String {
        match self.focus {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Message => &mut self.message,
        }
    }

    pub fn type_char(&mut self, c: char) {
        if !self.locked() {
            self.field_mut().push(c);
        }
    }

    pub fn backspace(&mut self) {
        if !self.locked() {
            self.field_mut().pop();
        }
    }

    /// The payload for submission, if the form is complete and unlocked.
    pub fn begin_submit(&mut self) -> Option<ContactMessage> {
        if self.locked() || !self.is_complete() {
            return None;
        }
        self.status = SubmitStatus::Sending;
        self.status_since = Some(Instant::now());
        Some(ContactMessage {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            message: self.message.trim().to_string(),
        })
    }

    pub fn submit_succeeded(&mut self) {
        self.status = SubmitStatus::Sent;
        self.status_since = Some(Instant::now());
        self.name.clear();
        self.email.clear();
        self.message.clear();
        self.focus = Field::Name;
    }

    pub fn submit_failed(&mut self) {
        self.status = SubmitStatus::Failed;
        self.status_since = Some(Instant::now());
    }

    /// Called every tick: sent/failed states clear after the fixed delay.
    pub fn expire_status(&mut self, now: Instant) {
        if matches!(self.status, SubmitStatus::Sent | SubmitStatus::Failed) {
            if let Some(since) = self.status_since {
                if now.duration_since(since) >= STATUS_CLEAR_AFTER {
                    self.status = SubmitStatus::Idle;
                    self.status_since = None;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> ContactForm {
        let mut form = ContactForm::default();
        form.name = "Ada".into();
        form.email = "ada@example.com".into();
        form.message = "Hello".into();
        form
    }

    #[test]
    fn incomplete_form_does_not_submit() {
        let mut form = ContactForm::default();
        form.name = "Ada".into();
        assert!(form.begin_submit().is_none());
        assert_eq!(form.status(), SubmitStatus::Idle);
    }

    #[test]
    fn submit_locks_input_until_outcome() {
        let mut form = filled();
        let payload = form.begin_submit().unwrap();
        assert_eq!(payload.name, "Ada");
        assert_eq!(form.status(), SubmitStatus::Sending);

        form.type_char('x');
        assert_eq!(form.name, "Ada");

        // A second submit while sending is refused.
        assert!(form.begin_submit().is_none());
    }

    #[test]
    fn success_clears_fields_and_failure_keeps_them() {
        let mut form = filled();
        form.begin_submit().unwrap();
        form.submit_succeeded();
        assert!(form.name.is_empty() && form.message.is_empty());

        let mut form = filled();
        form.begin_submit().unwrap();
        form.submit_failed();
        assert_eq!(form.name, "Ada");
        assert_eq!(form.status(), SubmitStatus::Failed);
        // Failed state is retryable.
        assert!(form.begin_submit().is_some());
    }

    #[test]
    fn sent_and_failed_states_auto_clear() {
        let mut form = filled();
        form.begin_submit().unwrap();
        form.submit_failed();

        let later = Instant::now() + STATUS_CLEAR_AFTER;
        form.expire_status(later);
        assert_eq!(form.status(), SubmitStatus::Idle);
    }

    #[test]
    fn focus_cycles_through_fields() {
        assert_eq!(Field::Name.next(), Field::Email);
        assert_eq!(Field::Message.next(), Field::Name);
        assert_eq!(Field::Name.prev(), Field::Message);
    }
}
