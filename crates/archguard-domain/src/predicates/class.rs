use super::{DescribedPredicate, NameMatcher};
use crate::description::Description;
use crate::error::Error;
use crate::graph::Class;

/// `"have simple name '{name}'"`; nested classes match on the part after `$`.
pub fn simple_name(name: &str) -> DescribedPredicate<Class> {
    let expected = name.to_string();
    DescribedPredicate::new(
        Description::fixed(format!("have simple name '{name}'")),
        move |class: &Class| class.simple_name() == expected,
    )
}

pub fn fully_qualified_name(name: &str) -> DescribedPredicate<Class> {
    let expected = name.to_string();
    DescribedPredicate::new(
        Description::fixed(format!("have fully qualified name '{name}'")),
        move |class: &Class| class.name() == expected,
    )
}

/// Package glob, see [`NameMatcher`] for the pattern rules.
pub fn reside_in_a_package(pattern: &str) -> Result<DescribedPredicate<Class>, Error> {
    let matcher = NameMatcher::new(&[pattern.to_string()])?;
    Ok(DescribedPredicate::new(
        Description::fixed(format!("reside in a package '{pattern}'")),
        move |class: &Class| matcher.is_match(class.package_name()),
    ))
}

pub fn reside_in_any_package(patterns: &[&str]) -> Result<DescribedPredicate<Class>, Error> {
    let owned: Vec<String> = patterns.iter().map(|p| p.to_string()).collect();
    let matcher = NameMatcher::new(&owned)?;
    let listed = owned
        .iter()
        .map(|p| format!("'{p}'"))
        .collect::<Vec<_>>()
        .join(", ");
    Ok(DescribedPredicate::new(
        Description::fixed(format!("reside in any package [{listed}]")),
        move |class: &Class| matcher.is_match(class.package_name()),
    ))
}
