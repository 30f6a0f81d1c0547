//! Narrowing a registry list by names to skip.

use std::collections::HashSet;

use crate::error::{Error, Result};
use crate::registry::{Check, Hook, Named};

/// Return the items of `list` whose name is not in `reject`, in their
/// original order.
///
/// Every name in `reject` must match an item of `list`; the first unknown
/// name fails the whole call and no partial list is returned. `kind` is the
/// noun used in the error message ("check", "hook").
pub fn filter<'a, T, S>(kind: &'static str, list: &'a [T], reject: &[S]) -> Result<Vec<&'a T>>
where
    T: Named,
    S: AsRef<str>,
{
    let all: HashSet<&str> = list.iter().map(|item| item.name()).collect();

    let mut disabled = HashSet::new();
    for name in reject {
        let name = name.as_ref();
        if !all.contains(name) {
            return Err(Error::UnknownName {
                kind,
                name: name.to_string(),
            });
        }
        disabled.insert(name);
    }

    Ok(list
        .iter()
        .filter(|item| !disabled.contains(item.name()))
        .collect())
}

pub fn filter_checks<'a, S: AsRef<str>>(list: &'a [Check], reject: &[S]) -> Result<Vec<&'a Check>> {
    filter("check", list, reject)
}

pub fn filter_hooks<'a, S: AsRef<str>>(list: &'a [Hook], reject: &[S]) -> Result<Vec<&'a Hook>> {
    filter("hook", list, reject)
}
