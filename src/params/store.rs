use std::fmt;

use crate::error::{ParameterError, Result};

use super::view::{capitalize, ParameterDocument, ParameterField, ParameterView};
use super::{ParameterSet, DISPLAY_SCALE, MEASUREMENT_UNIT};

type ChangeHandler = Box<dyn FnMut(&ParameterSet)>;

/// Holds one named parameter set for a shape instance and notifies a single
/// subscriber after every mutation.
///
/// Only one change handler is kept: registering a new one discards the
/// previous handler.
pub struct ParameterStore {
    template_name: String,
    parameters: ParameterSet,
    handler: Option<ChangeHandler>,
}

impl ParameterStore {
    /// Creates a store with the given initial parameters. The template name
    /// cannot be changed afterwards.
    #[must_use]
    pub fn new(initial: ParameterSet, template_name: impl Into<String>) -> Self {
        Self {
            template_name: template_name.into(),
            parameters: initial,
            handler: None,
        }
    }

    #[must_use]
    pub fn template_name(&self) -> &str {
        &self.template_name
    }

    /// Current raw parameter values.
    #[must_use]
    pub fn parameters(&self) -> &ParameterSet {
        &self.parameters
    }

    /// Merges `partial` into the set (overwrite-by-key) and notifies.
    pub fn set_parameters(&mut self, partial: &ParameterSet) {
        self.parameters.merge(partial);
        self.notify();
    }

    /// Stores `display_value / 10` under `name` and notifies.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError::NonFinite`] if `display_value` is NaN or
    /// infinite; the set is left untouched and no notification fires.
    pub fn set_parameter(&mut self, name: &str, display_value: f64) -> Result<()> {
        if !display_value.is_finite() {
            return Err(ParameterError::NonFinite {
                name: name.to_owned(),
                value: display_value,
            }
            .into());
        }
        self.parameters.insert(name, display_value / DISPLAY_SCALE);
        self.notify();
        Ok(())
    }

    /// Puts back a previously taken snapshot without notifying.
    pub(crate) fn restore(&mut self, snapshot: ParameterSet) {
        self.parameters = snapshot;
    }

    /// Replaces the change handler.
    pub fn set_change_handler(&mut self, handler: impl FnMut(&ParameterSet) + 'static) {
        self.handler = Some(Box::new(handler));
    }

    /// Removes the change handler, if any.
    pub fn clear_change_handler(&mut self) {
        self.handler = None;
    }

    /// Display-scaled fields plus the pretty-printed JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError::Json`] if serialization fails.
    pub fn parameter_view(&self) -> Result<ParameterView> {
        let fields = self
            .parameters
            .iter()
            .map(|(name, raw)| ParameterField {
                name: name.to_owned(),
                label: capitalize(name),
                value: raw * DISPLAY_SCALE,
                unit: MEASUREMENT_UNIT,
            })
            .collect();
        let document = ParameterDocument {
            template: self.template_name.clone(),
            parameters: self.parameters.clone(),
            measurement_unit: MEASUREMENT_UNIT.to_owned(),
        };
        Ok(ParameterView {
            fields,
            json: document.to_json_pretty()?,
        })
    }

    fn notify(&mut self) {
        if let Some(handler) = self.handler.as_mut() {
            handler(&self.parameters);
        }
    }
}

impl fmt::Debug for ParameterStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParameterStore")
            .field("template_name", &self.template_name)
            .field("parameters", &self.parameters)
            .field("has_handler", &self.handler.is_some())
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use approx::assert_relative_eq;

    use super::*;

    fn niche_store() -> ParameterStore {
        let initial = [("width", 100.0), ("height", 180.0), ("depth", 70.0)]
            .into_iter()
            .collect();
        ParameterStore::new(initial, "niche")
    }

    #[test]
    fn set_parameter_scales_down_and_view_scales_up() {
        let mut store = niche_store();
        for v in [0.0, 1.0, 123.4, -56.0, 1e6, 0.001] {
            store.set_parameter("width", v).unwrap();
            let view = store.parameter_view().unwrap();
            let field = view.fields.iter().find(|f| f.name == "width").unwrap();
            assert_relative_eq!(field.value, v, max_relative = 1e-12);
        }
        assert_relative_eq!(store.parameters().get("width").unwrap(), 0.1);
    }

    #[test]
    fn non_finite_edit_is_rejected_without_notification() {
        let mut store = niche_store();
        let calls = Rc::new(RefCell::new(0));
        let seen = Rc::clone(&calls);
        store.set_change_handler(move |_| *seen.borrow_mut() += 1);

        assert!(store.set_parameter("width", f64::NAN).is_err());
        assert!(store.set_parameter("width", f64::INFINITY).is_err());
        assert_eq!(*calls.borrow(), 0);
        assert_eq!(store.parameters().get("width"), Some(100.0));
    }

    #[test]
    fn restore_is_silent() {
        let mut store = niche_store();
        let snapshot = store.parameters().clone();
        store.set_parameter("depth", 10.0).unwrap();

        let calls = Rc::new(RefCell::new(0));
        let seen = Rc::clone(&calls);
        store.set_change_handler(move |_| *seen.borrow_mut() += 1);
        store.restore(snapshot);
        assert_eq!(*calls.borrow(), 0);
        assert_eq!(store.parameters().get("depth"), Some(70.0));
    }

    #[test]
    fn handler_receives_full_set_synchronously() {
        let mut store = niche_store();
        let received = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&received);
        store.set_change_handler(move |params| sink.borrow_mut().push(params.clone()));

        store.set_parameters(&[("depth", 50.0)].into_iter().collect());
        let received = received.borrow();
        assert_eq!(received.len(), 1);
        assert_eq!(received[0].len(), 3);
        assert_eq!(received[0].get("depth"), Some(50.0));
    }

    #[test]
    fn registering_a_handler_replaces_the_previous_one() {
        let mut store = niche_store();
        let first = Rc::new(RefCell::new(0));
        let second = Rc::new(RefCell::new(0));
        let a = Rc::clone(&first);
        let b = Rc::clone(&second);
        store.set_change_handler(move |_| *a.borrow_mut() += 1);
        store.set_change_handler(move |_| *b.borrow_mut() += 1);

        store.set_parameter("height", 200.0).unwrap();
        assert_eq!(*first.borrow(), 0);
        assert_eq!(*second.borrow(), 1);

        store.clear_change_handler();
        store.set_parameter("height", 210.0).unwrap();
        assert_eq!(*second.borrow(), 1);
    }

    #[test]
    fn view_labels_and_units() {
        let view = niche_store().parameter_view().unwrap();
        let labels: Vec<_> = view.fields.iter().map(|f| f.label.as_str()).collect();
        assert_eq!(labels, ["Width", "Height", "Depth"]);
        assert!(view.fields.iter().all(|f| f.unit == "mm"));
        assert_relative_eq!(view.fields[1].value, 1800.0);
    }

    #[test]
    fn json_document_matches_expected_layout() {
        let view = niche_store().parameter_view().unwrap();
        let expected = "{\n  \"template\": \"niche\",\n  \"width\": 100,\n  \"height\": 180,\n  \"depth\": 70,\n  \"measurement_unit\": \"mm\"\n}";
        assert_eq!(view.json, expected);
    }
}
