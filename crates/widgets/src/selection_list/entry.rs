use locale_host_api::{Document, NodeId};

/// Trim and case-fold text for matching.
pub(crate) fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

/// One selectable country or region, snapshotted from markup at mount.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CountryEntry {
    node: NodeId,
    value: String,
    name: String,
    aliases: Vec<String>,
    iso_code: String,
    currency_code: String,
    visible: bool,
    keys: SearchKeys,
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct SearchKeys {
    name: String,
    aliases: Vec<String>,
    iso_code: String,
    currency_code: String,
}

impl CountryEntry {
    /// Read the entry's `data-*` attributes. Missing attributes read as empty.
    pub(crate) fn from_node(doc: &dyn Document, node: NodeId) -> Self {
        let read = |key: &str| doc.dataset(node, key).unwrap_or_default().to_string();
        let visible = !doc.has_attribute(node, "hidden");
        Self::new(
            node,
            read("value"),
            read("name"),
            &read("aliases"),
            read("iso"),
            read("currency"),
            visible,
        )
    }

    fn new(
        node: NodeId,
        value: String,
        name: String,
        aliases: &str,
        iso_code: String,
        currency_code: String,
        visible: bool,
    ) -> Self {
        let aliases: Vec<String> = aliases
            .split(',')
            .map(str::trim)
            .filter(|alias| !alias.is_empty())
            .map(str::to_string)
            .collect();
        let keys = SearchKeys {
            name: normalize(&name),
            aliases: aliases.iter().map(|alias| normalize(alias)).collect(),
            iso_code: normalize(&iso_code),
            currency_code: normalize(&currency_code),
        };
        Self {
            node,
            value,
            name,
            aliases,
            iso_code,
            currency_code,
            visible,
            keys,
        }
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Token written into the form when this entry is chosen.
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    pub fn iso_code(&self) -> &str {
        &self.iso_code
    }

    pub fn currency_code(&self) -> &str {
        &self.currency_code
    }

    /// Whether the last filter pass left this entry shown.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub(crate) fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}

/// Normalized free-text query.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchQuery(String);

impl SearchQuery {
    pub fn new(raw: &str) -> Self {
        Self(normalize(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Substring match on name, any single alias and currency; exact match on
    /// the ISO code. The empty query matches everything.
    pub fn matches(&self, entry: &CountryEntry) -> bool {
        let query = self.0.as_str();
        if query.is_empty() {
            return true;
        }

        let keys = &entry.keys;
        keys.name.contains(query)
            || keys.aliases.iter().any(|alias| alias.contains(query))
            || keys.iso_code == query
            || keys.currency_code.contains(query)
    }
}
