//! Procedural macros for tui-todo

use std::collections::BTreeMap;

use darling::{FromDeriveInput, FromVariant};
use proc_macro::TokenStream;
use quote::{format_ident, quote};
use syn::{parse_macro_input, DeriveInput, Ident};

/// `#[action(...)]` on the enum
#[derive(Debug, FromDeriveInput)]
#[darling(attributes(action), supports(enum_any))]
struct ActionEnum {
    ident: Ident,
    data: darling::ast::Data<ActionVariant, ()>,

    /// Derive categories from variant name prefixes
    #[darling(default)]
    infer_categories: bool,
}

/// `#[action(...)]` on a variant
#[derive(Debug, FromVariant)]
#[darling(attributes(action))]
struct ActionVariant {
    ident: Ident,

    #[darling(default)]
    category: Option<String>,

    #[darling(default)]
    skip_category: bool,
}

impl ActionVariant {
    fn resolved_category(&self) -> Option<String> {
        if self.skip_category {
            return None;
        }
        self.category
            .clone()
            .or_else(|| infer_category(&self.ident.to_string()))
    }
}

// A category is every word before the first of these:
// `TodoClearCompleted` -> "todo", `InputSubmit` -> "input".
const VERBS: &[&str] = &[
    "Add", "Blur", "Cancel", "Change", "Clear", "Close", "Confirm", "Create", "Cycle", "Delete",
    "Down", "Drop", "End", "Enter", "Exit", "First", "Focus", "Hide", "Last", "Move", "Next",
    "Open", "Over", "Prev", "Remove", "Reset", "Resize", "Select", "Set", "Show", "Start",
    "Submit", "Toggle", "Up", "Update",
];

fn is_verb(word: &str) -> bool {
    VERBS.binary_search(&word).is_ok()
}

/// `"TodoClearCompleted"` -> `["Todo", "Clear", "Completed"]`
fn words(ident: &str) -> Vec<&str> {
    let mut bounds: Vec<usize> = ident
        .char_indices()
        .filter(|(i, c)| *i > 0 && c.is_uppercase())
        .map(|(i, _)| i)
        .collect();
    bounds.insert(0, 0);
    bounds.push(ident.len());
    bounds
        .windows(2)
        .map(|w| &ident[w[0]..w[1]])
        .filter(|w| !w.is_empty())
        .collect()
}

/// Category from a variant name: `None` for single words, names led by a
/// verb, and names with no verb at all.
fn infer_category(ident: &str) -> Option<String> {
    let words = words(ident);
    match words.as_slice() {
        ["Did", ..] => Some("async_result".to_string()),
        [first, rest @ ..] if !rest.is_empty() && !is_verb(first) => {
            let verb_at = 1 + rest.iter().position(|w| is_verb(w))?;
            let prefix: Vec<String> = words[..verb_at].iter().map(|w| w.to_lowercase()).collect();
            Some(prefix.join("_"))
        }
        _ => None,
    }
}

fn name_impl(ty: &Ident, variants: &[&ActionVariant]) -> proc_macro2::TokenStream {
    let arms = variants.iter().map(|v| {
        let ident = &v.ident;
        let text = ident.to_string();
        quote! { #ty::#ident { .. } => #text }
    });
    quote! {
        impl todo_core::Action for #ty {
            fn name(&self) -> &'static str {
                match self {
                    #(#arms,)*
                }
            }
        }
    }
}

fn category_impl(ty: &Ident, variants: &[&ActionVariant]) -> proc_macro2::TokenStream {
    // Sorted so the generated predicates come out in a stable order
    let mut members: BTreeMap<String, Vec<&Ident>> = BTreeMap::new();
    let arms: Vec<_> = variants
        .iter()
        .map(|v| {
            let ident = &v.ident;
            match v.resolved_category() {
                Some(category) => {
                    let tokens = quote! { #ty::#ident { .. } => ::core::option::Option::Some(#category) };
                    members.entry(category).or_default().push(ident);
                    tokens
                }
                None => quote! { #ty::#ident { .. } => ::core::option::Option::None },
            }
        })
        .collect();

    let predicates = members.iter().map(|(category, idents)| {
        let predicate = format_ident!("is_{}", category);
        let doc = format!("True for actions in the `{category}` category");
        quote! {
            #[doc = #doc]
            pub fn #predicate(&self) -> bool {
                matches!(self, #(#ty::#idents { .. })|*)
            }
        }
    });

    quote! {
        impl #ty {
            /// Category of this action, if it has one
            pub fn category(&self) -> ::core::option::Option<&'static str> {
                match self {
                    #(#arms,)*
                }
            }

            #(#predicates)*
        }

        impl todo_core::ActionCategory for #ty {
            fn category(&self) -> ::core::option::Option<&'static str> {
                #ty::category(self)
            }
        }
    }
}

/// Derive `todo_core::Action`: `name()` returns the variant name.
///
/// With `#[action(infer_categories)]` it also generates an inherent
/// `category()`, an `is_<category>()` predicate per category and the
/// `ActionCategory` impl. A variant can name its category with
/// `#[action(category = "...")]` or opt out with `#[action(skip_category)]`.
///
/// ```ignore
/// #[derive(Action, Clone, Debug)]
/// #[action(infer_categories)]
/// enum Action {
///     TodoToggle(TodoId),
///     FilterCycle,
///     #[action(category = "app")]
///     Quit,
/// }
///
/// assert_eq!(Action::FilterCycle.name(), "FilterCycle");
/// assert_eq!(Action::FilterCycle.category(), Some("filter"));
/// assert!(Action::Quit.is_app());
/// ```
#[proc_macro_derive(Action, attributes(action))]
pub fn derive_action(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let parsed = match ActionEnum::from_derive_input(&input) {
        Ok(parsed) => parsed,
        Err(e) => return e.write_errors().into(),
    };
    let Some(variants) = parsed.data.as_ref().take_enum() else {
        return syn::Error::new_spanned(&input.ident, "Action can only be derived for enums")
            .to_compile_error()
            .into();
    };

    let ty = &parsed.ident;
    let mut tokens = name_impl(ty, &variants);
    if parsed.infer_categories {
        tokens.extend(category_impl(ty, &variants));
    }
    tokens.into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_words() {
        assert_eq!(words("TodoClearCompleted"), vec!["Todo", "Clear", "Completed"]);
        assert_eq!(words("Quit"), vec!["Quit"]);
        assert_eq!(words("UiResize"), vec!["Ui", "Resize"]);
    }

    #[test]
    fn test_verbs_sorted_for_binary_search() {
        assert!(VERBS.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_infer_category_prefix() {
        assert_eq!(infer_category("TodoToggle"), Some("todo".into()));
        assert_eq!(infer_category("TodoClearCompleted"), Some("todo".into()));
        assert_eq!(infer_category("InputToggleCompleted"), Some("input".into()));
        assert_eq!(infer_category("SelectionNext"), Some("selection".into()));
        assert_eq!(infer_category("UiResize"), Some("ui".into()));
    }

    #[test]
    fn test_infer_category_multi_word_prefix() {
        assert_eq!(infer_category("CreateFormSubmit"), None);
        assert_eq!(infer_category("ColorSchemeToggle"), Some("color_scheme".into()));
    }

    #[test]
    fn test_infer_category_none() {
        assert_eq!(infer_category("Quit"), None);
        // Leading verb: primary action, not categorized
        assert_eq!(infer_category("ToggleTheme"), None);
        // No verb anywhere
        assert_eq!(infer_category("TodoThing"), None);
    }

    #[test]
    fn test_infer_category_did_prefix() {
        assert_eq!(infer_category("DidLoad"), Some("async_result".into()));
    }
}
