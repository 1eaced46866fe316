//! Render a [`Catalog`] into the storefront markup the widgets mount on.

use locale_host_api::{MarkupError, MemoryDocument, NodeId, NodeSpec, Role};

use crate::catalog::Catalog;

/// Element tag of the dropdown host.
pub const DROPDOWN_TAG: &str = "dropdown-localization-component";

const NO_RESULTS_TEXT: &str = "No countries or regions found.";
const TRIGGER_TEXT: &str = "Country/region";

/// Handles to the elements of a rendered picker.
#[derive(Debug, Clone)]
pub struct StorefrontMarkup {
    /// Page content outside the picker; target of outside clicks.
    pub outside: NodeId,
    pub dropdown: NodeId,
    pub button: NodeId,
    pub content: NodeId,
    pub list_host: NodeId,
    pub form: NodeId,
    pub filter_bar: NodeId,
    pub search: NodeId,
    pub reset: NodeId,
    pub country_list: NodeId,
    pub popular: NodeId,
    pub live_region: NodeId,
    pub no_results: NodeId,
    pub country_input: NodeId,
    pub language: NodeId,
    /// Country items in catalog order, with their selection values.
    pub items: Vec<(String, NodeId)>,
}

impl StorefrontMarkup {
    /// Node of the country item carrying `value`.
    pub fn item(&self, value: &str) -> Option<NodeId> {
        self.items
            .iter()
            .find(|(item_value, _)| item_value == value)
            .map(|(_, node)| *node)
    }

    /// Selection value of the country item `node`.
    pub fn value_of(&self, node: NodeId) -> Option<&str> {
        self.items
            .iter()
            .find(|(_, item)| *item == node)
            .map(|(value, _)| value.as_str())
    }
}

/// Append the picker for `catalog` to `doc`'s body.
pub fn render(
    doc: &mut MemoryDocument,
    catalog: &Catalog,
) -> Result<StorefrontMarkup, MarkupError> {
    let body = doc.body();
    let outside = doc.append(body, NodeSpec::new("main").id("storefront"))?;

    let dropdown = doc.append(body, NodeSpec::new(DROPDOWN_TAG))?;
    let button = doc.append(
        dropdown,
        NodeSpec::new("button")
            .role(Role::Button)
            .attr("type", "button")
            .attr("aria-expanded", "false")
            .text(TRIGGER_TEXT),
    )?;
    let content = doc.append(dropdown, NodeSpec::new("div").role(Role::Panel).hidden())?;

    let mut host_spec = NodeSpec::new("localization-form-component");
    if let Some(template) = &catalog.results_template {
        host_spec = host_spec.data("label-results-count", template.as_str());
    }
    let list_host = doc.append(content, host_spec)?;
    let form = doc.append(list_host, NodeSpec::new("form").role(Role::Form))?;
    let wrapper = doc.append(form, NodeSpec::new("div").role(Role::Wrapper))?;

    let filter_bar = doc.append(wrapper, NodeSpec::new("div").role(Role::CountryFilter))?;
    let search = doc.append(
        filter_bar,
        NodeSpec::new("input")
            .role(Role::Search)
            .attr("type", "search")
            .attr("aria-activedescendant", ""),
    )?;
    let reset = doc.append(
        filter_bar,
        NodeSpec::new("button")
            .role(Role::ResetButton)
            .attr("type", "button")
            .hidden()
            .text("Reset"),
    )?;

    let country_list = doc.append(wrapper, NodeSpec::new("div").role(Role::CountryList))?;
    let popular = doc.append(
        country_list,
        NodeSpec::new("ul")
            .role(Role::PopularCountries)
            .text("Popular"),
    )?;
    for country in catalog.popular() {
        doc.append(popular, NodeSpec::new("li").text(country.name.as_str()))?;
    }

    let all = doc.append(country_list, NodeSpec::new("ul").attr("role", "listbox"))?;
    let current = catalog.current_country.as_deref();
    let mut items = Vec::with_capacity(catalog.countries.len());
    for country in &catalog.countries {
        let value = country.value().to_string();
        let mut spec = NodeSpec::new("li")
            .role(Role::CountryItem)
            .id(format!("country-{value}"))
            .attr("role", "option")
            .attr("aria-selected", "false")
            .data("value", value.as_str())
            .data("name", country.name.as_str())
            .data("aliases", country.aliases.join(","))
            .data("iso", country.iso.as_str())
            .data("currency", country.currency.as_str())
            .text(country.name.as_str());
        if current == Some(value.as_str()) {
            spec = spec.attr("aria-current", "true");
        }
        let node = doc.append(all, spec)?;
        items.push((value, node));
    }

    let no_results = doc.append(
        wrapper,
        NodeSpec::new("p")
            .role(Role::NoResultsMessage)
            .hidden()
            .text(NO_RESULTS_TEXT),
    )?;
    let live_region = doc.append(
        wrapper,
        NodeSpec::new("div")
            .role(Role::LiveRegion)
            .attr("aria-live", "polite"),
    )?;

    let country_input = doc.append(
        form,
        NodeSpec::new("input")
            .role(Role::CountryInput)
            .attr("type", "hidden")
            .attr("name", "country_code")
            .value(current.unwrap_or_default()),
    )?;

    let current_language = catalog
        .current_language
        .clone()
        .or_else(|| catalog.languages.first().map(|language| language.code.clone()))
        .unwrap_or_default();
    let language = doc.append(
        form,
        NodeSpec::new("select")
            .role(Role::LanguageInput)
            .attr("name", "language_code")
            .value(current_language),
    )?;
    for option in &catalog.languages {
        doc.append(
            language,
            NodeSpec::new("option")
                .attr("value", option.code.as_str())
                .text(option.name.as_str()),
        )?;
    }

    Ok(StorefrontMarkup {
        outside,
        dropdown,
        button,
        content,
        list_host,
        form,
        filter_bar,
        search,
        reset,
        country_list,
        popular,
        live_region,
        no_results,
        country_input,
        language,
        items,
    })
}
