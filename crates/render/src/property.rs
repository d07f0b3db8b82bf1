/// A tunable scalar that mirrors a shader uniform.
///
/// Values are clamped into `[min, max]` when bounds are present.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    name: &'static str,
    value: f32,
    min: Option<f32>,
    max: Option<f32>,
}

impl Property {
    pub const fn bounded(name: &'static str, value: f32, min: f32, max: f32) -> Self {
        Self {
            name,
            value,
            min: Some(min),
            max: Some(max),
        }
    }

    pub const fn unbounded(name: &'static str, value: f32) -> Self {
        Self {
            name,
            value,
            min: None,
            max: None,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn min(&self) -> Option<f32> {
        self.min
    }

    pub fn max(&self) -> Option<f32> {
        self.max
    }

    /// Store `value` clamped into bounds and return what was stored.
    pub fn set(&mut self, value: f32) -> f32 {
        let mut v = value;
        if let Some(min) = self.min {
            v = v.max(min);
        }
        if let Some(max) = self.max {
            v = v.min(max);
        }
        self.value = v;
        v
    }
}
