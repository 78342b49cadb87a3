use std::cmp::Ordering;

use array_test_tools::{instantiate_sort_tests, patterns, Sort};
use arraykit::unmanaged;

struct Natural {}

impl Sort for Natural {
    fn name() -> String {
        "arraykit_natural".into()
    }

    fn sort<T>(arr: &mut [T])
    where
        T: Ord + Clone,
    {
        arraykit::sort(arr);
    }

    fn sort_by<T, F>(arr: &mut [T], compare: F)
    where
        T: Clone,
        F: FnMut(&T, &T) -> Ordering,
    {
        arraykit::sort_by(arr, compare);
    }
}

/// Drives `sort` through an explicit comparator.
struct Comparer {}

impl Sort for Comparer {
    fn name() -> String {
        "arraykit_comparer".into()
    }

    fn sort<T>(arr: &mut [T])
    where
        T: Ord + Clone,
    {
        arraykit::sort_by(arr, |a, b| a.cmp(b));
    }

    fn sort_by<T, F>(arr: &mut [T], compare: F)
    where
        T: Clone,
        F: FnMut(&T, &T) -> Ordering,
    {
        arraykit::sort_by(arr, compare);
    }
}

/// The key is a clone of the element itself.
struct KeySelector {}

impl Sort for KeySelector {
    fn name() -> String {
        "arraykit_key".into()
    }

    fn sort<T>(arr: &mut [T])
    where
        T: Ord + Clone,
    {
        arraykit::sort_by_key(arr, |e| e.clone());
    }

    fn sort_by<T, F>(arr: &mut [T], compare: F)
    where
        T: Clone,
        F: FnMut(&T, &T) -> Ordering,
    {
        arraykit::sort_by_key_with(arr, |e| e.clone(), compare);
    }
}

/// Key plus comparer, with the key wrapped so the comparer has to unwrap it.
struct KeyComparer {}

impl Sort for KeyComparer {
    fn name() -> String {
        "arraykit_key_comparer".into()
    }

    fn sort<T>(arr: &mut [T])
    where
        T: Ord + Clone,
    {
        arraykit::sort_by_key_with(arr, |e| (e.clone(),), |a, b| a.0.cmp(&b.0));
    }

    fn sort_by<T, F>(arr: &mut [T], mut compare: F)
    where
        T: Clone,
        F: FnMut(&T, &T) -> Ordering,
    {
        arraykit::sort_by_key_with(arr, |e| (e.clone(),), |a, b| compare(&a.0, &b.0));
    }
}

instantiate_sort_tests!(Natural, natural);
instantiate_sort_tests!(Comparer, comparer);
instantiate_sort_tests!(KeySelector, key);
instantiate_sort_tests!(KeyComparer, key_comparer);

#[test]
fn sort_returns_same_slice() {
    let mut v = [5, 3, 1, 4, 2];
    let ptr = v.as_ptr();

    let sorted = arraykit::sort(&mut v);
    assert_eq!(sorted.as_ptr(), ptr);
    assert_eq!(sorted, [1, 2, 3, 4, 5]);
}

#[test]
fn inconsistent_comparator_completes() {
    // Unspecified order, but never a panic and never a lost element.
    for mut compare in array_test_tools::tests::inconsistent_comparators() {
        for len in [2, 3, 17, 100, 1_000] {
            let original = patterns::random(len);
            let mut expected = original.clone();
            expected.sort_unstable();

            let mut managed = original.clone();
            arraykit::sort_by(&mut managed, &mut *compare);
            managed.sort_unstable();
            assert_eq!(managed, expected);

            let mut fast = original;
            unmanaged::sort_by(&mut fast, &mut *compare);
            fast.sort_unstable();
            assert_eq!(fast, expected);
        }
    }
}

#[test]
fn sort_by_key_field() {
    #[derive(Debug, PartialEq)]
    struct Entry {
        id: u32,
        name: &'static str,
    }

    // Not Clone, not Ord. Only the key is.
    let mut v = vec![
        Entry { id: 3, name: "c" },
        Entry { id: 1, name: "a" },
        Entry { id: 2, name: "b" },
    ];

    arraykit::sort_by_key(&mut v, |e| e.id);
    assert_eq!(v.iter().map(|e| e.name).collect::<String>(), "abc");

    arraykit::sort_by_key_with(&mut v, |e| e.name, |a, b| b.cmp(a));
    assert_eq!(v.iter().map(|e| e.id).collect::<Vec<_>>(), [3, 2, 1]);
}

#[test]
fn sort_range_inner() {
    let mut v = [9, 8, 7, 6, 5, 4, 3, 2, 1, 0];
    arraykit::sort_range(&mut v, 2, 5).unwrap();
    assert_eq!(v, [9, 8, 3, 4, 5, 6, 7, 2, 1, 0]);

    // Empty and single element ranges are no-ops, also at the very end.
    arraykit::sort_range(&mut v, 10, 0).unwrap();
    arraykit::sort_range(&mut v, 9, 1).unwrap();
    assert_eq!(v, [9, 8, 3, 4, 5, 6, 7, 2, 1, 0]);

    assert!(matches!(
        arraykit::sort_range(&mut v, 8, 3),
        Err(arraykit::ArrayError::OutOfBounds {
            offset: 8,
            count: 3,
            len: 10
        })
    ));
    assert!(matches!(
        arraykit::sort_range(&mut v, -1, 3),
        Err(arraykit::ArrayError::InvalidArgumentRange {
            argument: "offset",
            ..
        })
    ));
}

#[test]
fn reverse_involution() {
    let original = array_test_tools::patterns::random(1_000);

    let mut v = original.clone();
    arraykit::reverse(&mut v);
    assert_eq!(v.first(), original.last());
    arraykit::reverse(&mut v);
    assert_eq!(v, original);

    let mut s: Vec<String> = original.iter().map(|x| x.to_string()).collect();
    let expected: Vec<String> = s.iter().rev().cloned().collect();
    arraykit::reverse(&mut s);
    assert_eq!(s, expected);
}

#[test]
fn reverse_range_inner() {
    let mut v = [0, 1, 2, 3, 4, 5];
    arraykit::reverse_range(&mut v, 1, 4).unwrap();
    assert_eq!(v, [0, 4, 3, 2, 1, 5]);

    arraykit::reverse_range(&mut v, 6, 0).unwrap();
    assert_eq!(v, [0, 4, 3, 2, 1, 5]);

    assert!(arraykit::reverse_range(&mut v, 7, 0).is_err());
}

#[test]
fn regions() {
    let mut v = [10, 20, 30, 40, 50];

    assert_eq!(arraykit::region(&v, 1, 3).unwrap(), &[20, 30, 40]);
    assert_eq!(arraykit::region(&v, 5, 0).unwrap(), &[] as &[i32]);
    assert!(arraykit::region(&v, 6, 0).is_err());

    arraykit::region_mut(&mut v, 0, 2).unwrap()[1] = 21;
    assert_eq!(v, [10, 21, 30, 40, 50]);

    use arraykit::{Index, IndexRange};

    assert_eq!(arraykit::region_of(&mut v, 1..3).unwrap(), &[21, 30]);
    assert_eq!(arraykit::region_of(&mut v, ..=1).unwrap(), &[10, 21]);
    assert_eq!(arraykit::region_of(&mut v, 3..).unwrap(), &[40, 50]);
    assert_eq!(arraykit::region_of(&mut v, ..).unwrap().len(), 5);
    assert_eq!(
        arraykit::region_of(
            &mut v,
            IndexRange::new(Index::from_end(2), Index::from_end(0))
        )
        .unwrap(),
        &[40, 50]
    );

    assert!(arraykit::region_of(&mut v, 4..6).is_err());
    assert!(arraykit::region_of(
        &mut v,
        IndexRange::new(Index::from_end(6), Index::from_end(0))
    )
    .is_err());
}
