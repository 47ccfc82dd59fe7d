use crate::config::ContactAck;

/// Outcome of submitting the contact form. There is no delivery; every
/// submission succeeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub message: String,
    pub reset_form: bool,
}

pub fn submit(ack: &ContactAck) -> Submission {
    Submission {
        message: ack.0.clone(),
        reset_form: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn always_acknowledges_and_resets() {
        let outcome = submit(&ContactAck::default());
        assert!(outcome.reset_form);
        assert!(outcome.message.starts_with("Cảm ơn"));
    }
}
