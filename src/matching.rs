use std::error::Error;
use std::iter;

use crate::chain::Chain;

/// Equality of a target against any error found in a chain.
///
/// The target decides what matches: `is` calls `matches` on the value being
/// searched for, never on the links of the chain. A link type cannot bring
/// its own equality; give the target type a `Comparable` impl instead.
///
/// Every `Error + PartialEq` type gets this for free: the candidate is downcast
/// to the target's type and compared with `==`. Error types without
/// `PartialEq` can implement it themselves to decide what counts as a match,
/// e.g. by kind or by message.
pub trait Comparable {
    fn matches(&self, candidate: &(dyn Error + 'static)) -> bool;
}

impl<T> Comparable for T
where
    T: Error + PartialEq + 'static,
{
    fn matches(&self, candidate: &(dyn Error + 'static)) -> bool {
        candidate.downcast_ref::<T>() == Some(self)
    }
}

/// Every link starting at `err`, outermost first, down to the root cause.
pub fn links<'a>(
    err: Option<&'a (dyn Error + 'static)>,
) -> impl Iterator<Item = &'a (dyn Error + 'static)> + 'a {
    iter::successors(err, |&link| link.source())
}

pub fn root_cause<'a>(
    err: Option<&'a (dyn Error + 'static)>,
) -> Option<&'a (dyn Error + 'static)> {
    links(err).last()
}

/// Visits every error reachable from `err` until `visit` returns something.
///
/// Each link is offered whole first. A [`Chain`] link then has its displayed
/// value walked the same way before moving on to the cause, so chains nested
/// as a parent are searched too.
fn walk<'a, R, F>(err: Option<&'a (dyn Error + 'static)>, visit: &mut F) -> Option<R>
where
    F: FnMut(&'a (dyn Error + 'static)) -> Option<R>,
{
    for link in links(err) {
        if let Some(found) = visit(link) {
            return Some(found);
        }
        if let Some(chain) = link.downcast_ref::<Chain>() {
            if let Some(found) = walk(Some(chain.displayed()), visit) {
                return Some(found);
            }
        }
    }
    None
}

/// Whether anything in the chain starting at `err` matches `target`.
pub fn is<T>(err: Option<&(dyn Error + 'static)>, target: &T) -> bool
where
    T: Comparable + ?Sized,
{
    walk(err, &mut |candidate| target.matches(candidate).then_some(())).is_some()
}

/// Like [`is`], but by reference identity: `target` has to be the very object
/// stored somewhere in the chain.
pub fn is_same(err: Option<&(dyn Error + 'static)>, target: &(dyn Error + 'static)) -> bool {
    walk(err, &mut |candidate| std::ptr::addr_eq(candidate, target).then_some(())).is_some()
}

/// The outermost error of type `T` in the chain.
///
/// Deeper errors of the same type are never reached once one matched.
pub fn find<'a, T>(err: Option<&'a (dyn Error + 'static)>) -> Option<&'a T>
where
    T: Error + 'static,
{
    walk(err, &mut |candidate| candidate.downcast_ref::<T>())
}

/// Stores the outermost error of type `T` into `target` and reports whether
/// one was found. `target` keeps its previous value otherwise.
pub fn as_error<'a, T>(
    err: Option<&'a (dyn Error + 'static)>,
    target: &mut Option<&'a T>,
) -> bool
where
    T: Error + 'static,
{
    match find::<T>(err) {
        Some(found) => {
            *target = Some(found);
            true
        }
        None => false,
    }
}

impl Chain {
    pub fn links(&self) -> impl Iterator<Item = &(dyn Error + 'static)> + '_ {
        links(Some(self))
    }

    pub fn root_cause(&self) -> &(dyn Error + 'static) {
        root_cause(Some(self)).unwrap_or(self)
    }

    pub fn is<T: Comparable + ?Sized>(&self, target: &T) -> bool {
        is(Some(self), target)
    }

    pub fn find<T: Error + 'static>(&self) -> Option<&T> {
        find(Some(self))
    }
}
