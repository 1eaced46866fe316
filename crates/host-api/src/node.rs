use std::fmt;

use serde::Serialize;

/// Opaque handle to an element owned by a [`Document`](crate::Document).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Raw index of the node inside its document.
    pub fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// How an element advertises a [`Role`] in markup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Marker {
    /// `data-localization-ref="<value>"`.
    Ref(&'static str),
    /// Carries the given class.
    Class(&'static str),
    /// Element with the given tag name.
    Tag(&'static str),
    /// Element with the given tag name and class.
    TagClass(&'static str, &'static str),
}

/// Attribute carrying [`Marker::Ref`] values.
pub const REF_ATTRIBUTE: &str = "data-localization-ref";

/// Elements the widgets look up inside their host subtree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    /// Form posted when a country or language is chosen.
    Form,
    /// Scrollable container of country items.
    CountryList,
    /// Hidden field receiving the chosen country code.
    CountryInput,
    /// Free-text search field.
    Search,
    /// Button clearing the search field.
    ResetButton,
    /// Accessibility announcement area.
    LiveRegion,
    /// Message shown when nothing matches.
    NoResultsMessage,
    /// Hidden field (or select) receiving the chosen language.
    LanguageInput,
    /// One selectable country entry.
    CountryItem,
    /// Wrapper toggled into its searching style.
    Wrapper,
    /// Sub-list of popular countries shown for the empty query.
    PopularCountries,
    /// Filter bar flagged while the list is scrolled.
    CountryFilter,
    /// Host element of an embedded selection list.
    LocalizationForm,
    /// Dropdown trigger button.
    Button,
    /// Dropdown content.
    Panel,
}

impl Role {
    /// Markup convention used to find elements with this role.
    pub const fn marker(self) -> Marker {
        match self {
            Role::Form => Marker::TagClass("form", "localization-form"),
            Role::CountryList => Marker::Ref("countryList"),
            Role::CountryInput => Marker::Ref("countryInput"),
            Role::Search => Marker::Ref("search"),
            Role::ResetButton => Marker::Ref("resetButton"),
            Role::LiveRegion => Marker::Ref("liveRegion"),
            Role::NoResultsMessage => Marker::Ref("noResultsMessage"),
            Role::LanguageInput => Marker::Ref("languageInput"),
            Role::CountryItem => Marker::Ref("countryItem"),
            Role::Wrapper => Marker::Class("country-selector-form__wrapper"),
            Role::PopularCountries => Marker::Class("popular-countries"),
            Role::CountryFilter => Marker::Class("country-filter"),
            Role::LocalizationForm => Marker::Tag("localization-form-component"),
            Role::Button => Marker::Ref("button"),
            Role::Panel => Marker::Ref("panel"),
        }
    }
}
