/// One performance measurement attached to a check report.
///
/// Nothing is enforced between the fields: inverted ranges or thresholds
/// outside `min..max` are stored and rendered as given.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Metric {
    pub value: f64,
    pub warn: f64,
    pub crit: f64,
    pub min: f64,
    pub max: f64,
    pub unit: String,
}

impl Metric {
    pub fn new(value: f64) -> Self {
        Self {
            value,
            ..Self::default()
        }
    }

    pub fn with_thresholds(mut self, warn: f64, crit: f64) -> Self {
        self.warn = warn;
        self.crit = crit;
        self
    }

    pub fn with_range(mut self, min: f64, max: f64) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    pub fn with_unit<S: Into<String>>(mut self, unit: S) -> Self {
        self.unit = unit.into();
        self
    }
}
