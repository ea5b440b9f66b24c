//! DOM queries and element actions.
//!
//! Elements are addressed as the `index`-th match of a CSS selector and
//! resolved to a remote object on every call, so a re-rendered page never
//! leaves a stale handle behind.

use serde_json::{Value, json};

use crate::cdp::error::CdpError;
use crate::cdp::protocol::BoxModel;

use super::core::PageSession;

/// Finds the first element under `selector` whose text contains any needle,
/// case-insensitively. Buttons and inputs also match on their value.
const FIND_BY_TEXT_JS: &str = r#"(selector, needles) => {
    const wanted = needles.map(n => n.toLowerCase());
    const nodes = Array.from(document.querySelectorAll(selector));
    return nodes.findIndex(el => {
        const text = ((el.innerText || el.textContent || '') + ' ' + (el.value || '')).toLowerCase();
        return wanted.some(w => text.includes(w));
    });
}"#;

/// Clears a form control through the native value setter so frameworks that
/// track input state see the change.
const CLEAR_VALUE_JS: &str = r#"function() {
    this.scrollIntoView({block: 'center'});
    this.focus();
    const proto = this instanceof HTMLTextAreaElement
        ? HTMLTextAreaElement.prototype
        : (this instanceof HTMLSelectElement ? HTMLSelectElement.prototype : HTMLInputElement.prototype);
    const desc = Object.getOwnPropertyDescriptor(proto, 'value');
    if (desc && desc.set) { desc.set.call(this, ''); } else { this.value = ''; }
    this.dispatchEvent(new Event('input', {bubbles: true}));
}"#;

const COMMIT_VALUE_JS: &str = r#"function() {
    this.dispatchEvent(new Event('change', {bubbles: true}));
    this.blur();
}"#;

fn selector_literal(selector: &str) -> String {
    Value::String(selector.to_string()).to_string()
}

impl PageSession {
    /// Number of elements matching `selector`.
    pub async fn count_selector(&self, selector: &str) -> Result<usize, CdpError> {
        let expr = format!(
            "document.querySelectorAll({}).length",
            selector_literal(selector)
        );
        let value = self.evaluate(&expr).await?;
        Ok(value.as_u64().unwrap_or(0) as usize)
    }

    /// Index of the first `selector` match containing any of `needles`.
    pub async fn find_by_text(
        &self,
        selector: &str,
        needles: &[&str],
    ) -> Result<Option<usize>, CdpError> {
        let expr = format!(
            "({})({}, {})",
            FIND_BY_TEXT_JS,
            selector_literal(selector),
            json!(needles)
        );
        let value = self.evaluate(&expr).await?;
        Ok(value
            .as_i64()
            .filter(|i| *i >= 0)
            .map(|i| i as usize))
    }

    /// Remote object id of the `index`-th match.
    pub async fn resolve_nth(&self, selector: &str, index: usize) -> Result<String, CdpError> {
        let expr = format!(
            "document.querySelectorAll({})[{}]",
            selector_literal(selector),
            index
        );
        let object = self.evaluate_handle(&expr).await?;
        object
            .object_id
            .ok_or_else(|| CdpError::ElementNotFound(format!("{} [{}]", selector, index)))
    }

    /// Box model of a remote object, `None` if it is not rendered.
    pub async fn get_box_model(&self, object_id: &str) -> Result<Option<BoxModel>, CdpError> {
        match self
            .call("DOM.getBoxModel", Some(json!({ "objectId": object_id })))
            .await
        {
            Ok(result) => Ok(Some(serde_json::from_value(result["model"].clone())?)),
            Err(CdpError::Protocol { code: -32000, .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Click the `index`-th match of `selector`.
    ///
    /// Dispatches a real mouse click at the element's center; elements
    /// without a layout box are clicked through `HTMLElement.click()`.
    pub async fn click_nth(&self, selector: &str, index: usize) -> Result<(), CdpError> {
        let object_id = self.resolve_nth(selector, index).await?;
        self.call_function_on(
            &object_id,
            "function() { this.scrollIntoView({block: 'center'}); }",
            vec![],
        )
        .await?;

        let center = self
            .get_box_model(&object_id)
            .await?
            .and_then(|model| model.center());

        let outcome = match center {
            Some((x, y)) => self.click(x, y).await,
            None => self
                .call_function_on(&object_id, "function() { this.click(); }", vec![])
                .await
                .map(|_| ()),
        };

        let _ = self.release_object(&object_id).await;
        outcome
    }

    /// Replace the value of the `index`-th match of `selector` with `value`.
    pub async fn fill_nth(&self, selector: &str, index: usize, value: &str) -> Result<(), CdpError> {
        let object_id = self.resolve_nth(selector, index).await?;

        let outcome: Result<(), CdpError> = async {
            self.call_function_on(&object_id, CLEAR_VALUE_JS, vec![])
                .await?;
            self.insert_text(value).await?;
            self.call_function_on(&object_id, COMMIT_VALUE_JS, vec![])
                .await?;
            Ok(())
        }
        .await;

        let _ = self.release_object(&object_id).await;
        outcome
    }
}
