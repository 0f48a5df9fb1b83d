//! Escaping utilities for values written into manifests.
//!
//! Member and type names come straight from org data (folder and report
//! developer names, discovered type names). They MUST pass through
//! [`xml::escape`] before being written into `package.xml`.
//!
//! ```rust
//! use busbar_sf_cli::security::xml;
//!
//! let line = format!("<members>{}</members>", xml::escape("Sales & Ops"));
//! assert_eq!(line, "<members>Sales &amp; Ops</members>");
//! ```

/// XML escaping utilities.
pub mod xml {
    /// Escape a string for safe inclusion in XML content.
    ///
    /// This escapes the five predefined XML entities.
    ///
    /// # Example
    ///
    /// ```rust
    /// use busbar_sf_cli::security::xml;
    ///
    /// let safe = xml::escape("Hello <World> & 'Friends'");
    /// assert_eq!(safe, "Hello &lt;World&gt; &amp; &apos;Friends&apos;");
    /// ```
    #[must_use]
    pub fn escape(value: &str) -> String {
        let mut escaped = String::with_capacity(value.len() + 16);
        for ch in value.chars() {
            match ch {
                '&' => escaped.push_str("&amp;"),
                '<' => escaped.push_str("&lt;"),
                '>' => escaped.push_str("&gt;"),
                '"' => escaped.push_str("&quot;"),
                '\'' => escaped.push_str("&apos;"),
                _ => escaped.push(ch),
            }
        }
        escaped
    }
}
