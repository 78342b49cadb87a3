use std::cmp::Ordering;

/// One of the ordering shapes a sort implementation can be driven with. Test bodies in
/// [`tests`] are written against this trait and stamped out per implementation with
/// [`instantiate_sort_tests!`].
pub trait Sort {
    fn name() -> String;

    fn sort<T>(arr: &mut [T])
    where
        T: Ord + Clone;

    fn sort_by<T, F>(arr: &mut [T], compare: F)
    where
        T: Clone,
        F: FnMut(&T, &T) -> Ordering;
}

pub mod patterns;

#[doc(hidden)]
pub use paste;
