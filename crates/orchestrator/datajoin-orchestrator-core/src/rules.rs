//! Attribute rules: ordered maps from attribute key to value-producing closure.
//!
//! Keys are parsed and checked for duplicates when a rule is added, so an
//! invalid plan never reaches `apply`.

use indexmap::IndexMap;
use std::fmt;

use datajoin_api_core::{AttrKey, Value};
use datajoin_join_core::Binding;
use datajoin_scale_core::Scale;

use crate::error::OrchestratorError;

/// Computes an attribute value from a record and its snapshot index.
pub type RuleFn<R> = Box<dyn Fn(&R, usize) -> anyhow::Result<Value>>;

/// Computes the value an exiting element animates towards.
pub type ExitRuleFn = Box<dyn Fn(&Binding) -> anyhow::Result<Value>>;

fn checked_key<T>(rules: &IndexMap<AttrKey, T>, key: &str) -> Result<AttrKey, OrchestratorError> {
    let parsed = AttrKey::parse(key)?;
    if rules.contains_key(&parsed) {
        return Err(OrchestratorError::DuplicateRule(parsed.to_string()));
    }
    Ok(parsed)
}

pub struct AttributeRules<R> {
    rules: IndexMap<AttrKey, RuleFn<R>>,
}

impl<R> Default for AttributeRules<R> {
    fn default() -> Self {
        Self {
            rules: IndexMap::new(),
        }
    }
}

impl<R> fmt::Debug for AttributeRules<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.rules.keys()).finish()
    }
}

impl<R> AttributeRules<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a boxed rule under `key` (parsed with the attribute key grammar).
    pub fn insert(&mut self, key: &str, rule: RuleFn<R>) -> Result<(), OrchestratorError> {
        let parsed = checked_key(&self.rules, key)?;
        self.rules.insert(parsed, rule);
        Ok(())
    }

    /// Rule that may fail; failures surface as diagnostics.
    pub fn try_attr<F>(mut self, key: &str, f: F) -> Result<Self, OrchestratorError>
    where
        F: Fn(&R, usize) -> anyhow::Result<Value> + 'static,
    {
        self.insert(key, Box::new(f))?;
        Ok(self)
    }

    /// Infallible rule under a full key (`"x"`, `"attr.x"`, `"style.fill"`, `"text"`).
    pub fn attr<F, V>(self, key: &str, f: F) -> Result<Self, OrchestratorError>
    where
        F: Fn(&R, usize) -> V + 'static,
        V: Into<Value>,
    {
        self.try_attr(key, move |r, i| Ok(f(r, i).into()))
    }

    /// Inline style rule; `name` is the bare property name.
    pub fn style<F, V>(self, name: &str, f: F) -> Result<Self, OrchestratorError>
    where
        F: Fn(&R, usize) -> V + 'static,
        V: Into<Value>,
    {
        self.attr(&format!("style.{name}"), f)
    }

    /// Text content rule.
    pub fn text<F, S>(self, f: F) -> Result<Self, OrchestratorError>
    where
        F: Fn(&R, usize) -> S + 'static,
        S: Into<String>,
    {
        self.attr("text", move |r, i| Value::Text(f(r, i).into()))
    }

    /// Map a numeric field through a scale. Non-finite inputs fail the rule.
    pub fn scaled<F>(self, key: &str, scale: Scale, field: F) -> Result<Self, OrchestratorError>
    where
        F: Fn(&R) -> f32 + 'static,
    {
        self.try_attr(key, move |r, _| {
            let x = field(r);
            if !x.is_finite() {
                anyhow::bail!("scale input {x} is not finite");
            }
            Ok(scale.map(x))
        })
    }

    pub fn get(&self, key: &AttrKey) -> Option<&RuleFn<R>> {
        self.rules.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&AttrKey, &RuleFn<R>)> {
        self.rules.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &AttrKey> {
        self.rules.keys()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[derive(Default)]
pub struct ExitRules {
    rules: IndexMap<AttrKey, ExitRuleFn>,
}

impl fmt::Debug for ExitRules {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.rules.keys()).finish()
    }
}

impl ExitRules {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: &str, rule: ExitRuleFn) -> Result<(), OrchestratorError> {
        let parsed = checked_key(&self.rules, key)?;
        self.rules.insert(parsed, rule);
        Ok(())
    }

    pub fn try_attr<F>(mut self, key: &str, f: F) -> Result<Self, OrchestratorError>
    where
        F: Fn(&Binding) -> anyhow::Result<Value> + 'static,
    {
        self.insert(key, Box::new(f))?;
        Ok(self)
    }

    pub fn attr<F, V>(self, key: &str, f: F) -> Result<Self, OrchestratorError>
    where
        F: Fn(&Binding) -> V + 'static,
        V: Into<Value>,
    {
        self.try_attr(key, move |b| Ok(f(b).into()))
    }

    /// Constant exit value, e.g. fading opacity to zero.
    pub fn constant(self, key: &str, value: impl Into<Value>) -> Result<Self, OrchestratorError> {
        let value = value.into();
        self.attr(key, move |_| value.clone())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&AttrKey, &ExitRuleFn)> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use datajoin_api_core::ElementHandle;
    use datajoin_join_core::Key;

    #[test]
    fn keys_keep_declaration_order() {
        let rules = AttributeRules::<f32>::new()
            .attr("x", |v, _| *v)
            .unwrap()
            .style("fill", |_, _| "red")
            .unwrap()
            .text(|v, i| format!("{i}:{v}"))
            .unwrap();
        let keys: Vec<String> = rules.keys().map(ToString::to_string).collect();
        assert_eq!(keys, vec!["x", "style.fill", "text"]);
        let text = rules.get(&AttrKey::Text).unwrap();
        assert_eq!(text(&2.5, 1).unwrap(), Value::text("1:2.5"));
    }

    #[test]
    fn duplicate_and_invalid_keys_are_rejected() {
        let err = AttributeRules::<f32>::new()
            .attr("x", |v, _| *v)
            .unwrap()
            .attr("attr.x", |v, _| *v)
            .unwrap_err();
        assert!(matches!(err, OrchestratorError::DuplicateRule(k) if k == "x"));

        let err = AttributeRules::<f32>::new().attr("style.", |v, _| *v).unwrap_err();
        assert!(matches!(err, OrchestratorError::InvalidAttribute(_)));
        let err = ExitRules::new().constant("has space", 0.0).unwrap_err();
        assert!(matches!(err, OrchestratorError::InvalidAttribute(_)));
    }

    #[test]
    fn scaled_rule_maps_and_rejects_nan() {
        let scale = Scale::linear(&[0.0, 10.0], &[0.0, 100.0]).unwrap();
        let rules = AttributeRules::<f32>::new().scaled("width", scale, |v| *v).unwrap();
        let rule = rules.get(&AttrKey::attr("width")).unwrap();
        assert_eq!(rule(&5.0, 0).unwrap(), Value::Float(50.0));
        assert!(rule(&f32::NAN, 0).is_err());
    }

    #[test]
    fn exit_rule_sees_binding() {
        let rules = ExitRules::new()
            .attr("x", |b: &Binding| b.index as f32)
            .unwrap();
        let (_, rule) = rules.iter().next().unwrap();
        let b = Binding::new(Key::from("k"), ElementHandle(0), 3);
        assert_eq!(rule(&b).unwrap(), Value::Float(3.0));
    }
}
