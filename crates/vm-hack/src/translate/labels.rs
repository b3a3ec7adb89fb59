/// Allocator for internal labels, scoped to one translation run.
///
/// Two independent counters, each strictly increasing and never reset
/// mid-run, so every allocated label is unique across the whole output
/// stream even when identical source instructions recur across modules.
#[derive(Debug, Default)]
pub struct LabelAllocator {
    comparison: u32,
    return_address: u32,
}

/// The label pair consumed by one comparison: branch target for the true
/// case and the join point after the boolean has been pushed.
#[derive(Debug)]
pub struct ComparisonLabels {
    pub if_true: String,
    pub end: String,
}

impl LabelAllocator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn comparison_pair(&mut self) -> ComparisonLabels {
        let n = self.comparison;
        self.comparison += 1;
        ComparisonLabels {
            if_true: format!("CMP_TRUE_{n}"),
            end: format!("CMP_END_{n}"),
        }
    }

    /// Return-address label for a call site inside `caller`. Repeated calls
    /// from the same caller get distinct labels.
    pub fn return_address(&mut self, caller: &str) -> String {
        let n = self.return_address;
        self.return_address += 1;
        format!("{caller}$ret.{n}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comparison_labels_never_repeat() {
        let mut labels = LabelAllocator::new();
        let first = labels.comparison_pair();
        let second = labels.comparison_pair();
        assert_ne!(first.if_true, second.if_true);
        assert_ne!(first.end, second.end);
        assert_ne!(first.if_true, first.end);
    }

    #[test]
    fn return_labels_distinct_for_same_caller() {
        let mut labels = LabelAllocator::new();
        let a = labels.return_address("Main.main");
        let b = labels.return_address("Main.main");
        assert_eq!(a, "Main.main$ret.0");
        assert_eq!(b, "Main.main$ret.1");
    }

    #[test]
    fn counters_are_independent() {
        let mut labels = LabelAllocator::new();
        labels.return_address("F.g");
        labels.return_address("F.g");
        let pair = labels.comparison_pair();
        assert_eq!(pair.if_true, "CMP_TRUE_0");
    }
}
