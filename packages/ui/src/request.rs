//! Ordering for overlapping requests that write the same view state.

/// Counts the requests a view has started. Each request takes a ticket when it
/// starts and may apply its response only while that ticket is still current, so
/// a slow response never overwrites the result of a newer request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestGeneration(u64);

impl RequestGeneration {
    /// Start a request, superseding every earlier one.
    pub fn next(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(1);
        self.0
    }

    pub fn is_current(&self, ticket: u64) -> bool {
        self.0 == ticket
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newer_request_supersedes_older() {
        let mut requests = RequestGeneration::default();
        let page = requests.next();
        assert!(requests.is_current(page));

        let search = requests.next();
        assert!(!requests.is_current(page));
        assert!(requests.is_current(search));
    }

    #[test]
    fn test_tickets_stay_distinct_across_wrap() {
        let mut requests = RequestGeneration(u64::MAX);
        let ticket = requests.next();
        assert_eq!(ticket, 0);
        assert!(!requests.is_current(u64::MAX));
    }
}
