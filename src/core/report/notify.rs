//! Where the end-of-run summary goes

/// Receiver of user-facing messages
pub trait Notifier {
    /// Show an informational message
    fn notify(&mut self, message: &str);

    /// Show an error message
    fn notify_error(&mut self, message: &str) {
        self.notify(message);
    }
}

/// Prints to stdout, errors to stderr
#[derive(Debug, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&mut self, message: &str) {
        println!("{message}");
    }

    fn notify_error(&mut self, message: &str) {
        eprintln!("{message}");
    }
}

/// Keeps messages in memory
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    pub messages: Vec<String>,
    pub errors: Vec<String>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last message of either kind
    pub fn last(&self) -> Option<&str> {
        self.errors
            .last()
            .or_else(|| self.messages.last())
            .map(String::as_str)
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&mut self, message: &str) {
        self.messages.push(message.to_string());
    }

    fn notify_error(&mut self, message: &str) {
        self.errors.push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_notifier_separates_errors() {
        let mut notifier = MemoryNotifier::new();
        notifier.notify("done");
        notifier.notify_error("broken");
        assert_eq!(notifier.messages, vec!["done"]);
        assert_eq!(notifier.errors, vec!["broken"]);
        assert_eq!(notifier.last(), Some("broken"));
    }

    #[test]
    fn test_default_error_falls_back_to_notify() {
        struct Collect(Vec<String>);
        impl Notifier for Collect {
            fn notify(&mut self, message: &str) {
                self.0.push(message.to_string());
            }
        }

        let mut notifier = Collect(Vec::new());
        notifier.notify_error("oops");
        assert_eq!(notifier.0, vec!["oops"]);
    }
}
