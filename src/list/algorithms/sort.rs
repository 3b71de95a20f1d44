use std::cmp::Ordering;

/// Stable insertion sort of `buffer` by `compare`.
///
/// Each element is shifted left past every element that compares greater,
/// so equal elements keep their relative order.
pub(crate) fn insertion_sort<T, F>(buffer: &mut [T], mut compare: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    for sorted_len in 1..buffer.len() {
        let mut at = sorted_len;
        while at > 0 && compare(&buffer[at - 1], &buffer[at]) == Ordering::Greater {
            buffer.swap(at - 1, at);
            at -= 1;
        }
    }
}

/// Exchange sort of `buffer` by `compare`: adjacent pairs out of order are
/// swapped, and each pass settles the greatest remaining element at the end
/// of the unsorted prefix.
pub(crate) fn bubble_sort<T, F>(buffer: &mut [T], mut compare: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    let len = buffer.len();
    for pass in 1..len {
        for at in 0..len - pass {
            if compare(&buffer[at], &buffer[at + 1]) == Ordering::Greater {
                buffer.swap(at, at + 1);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{bubble_sort, insertion_sort};
    use quickcheck_macros::quickcheck;

    #[test]
    fn insertion_sort_is_stable() {
        let mut pairs = vec![(2, 'a'), (1, 'b'), (2, 'c'), (1, 'd'), (0, 'e')];
        insertion_sort(&mut pairs, |a, b| a.0.cmp(&b.0));
        assert_eq!(
            pairs,
            vec![(0, 'e'), (1, 'b'), (1, 'd'), (2, 'a'), (2, 'c')]
        );
    }

    #[test]
    fn bubble_sort_reversed() {
        let mut items = vec![3, 1, 4, 1, 5, 9, 2, 6];
        bubble_sort(&mut items, |a, b| b.cmp(a));
        assert_eq!(items, vec![9, 6, 5, 4, 3, 2, 1, 1]);
    }

    #[quickcheck]
    fn sorts_agree_with_std(items: Vec<i16>) -> bool {
        let mut expected = items.clone();
        expected.sort();
        let mut by_insertion = items.clone();
        insertion_sort(&mut by_insertion, |a, b| a.cmp(b));
        let mut by_bubble = items;
        bubble_sort(&mut by_bubble, |a, b| a.cmp(b));
        by_insertion == expected && by_bubble == expected
    }
}
