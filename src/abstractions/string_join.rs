use std::{
  fmt::Display,
  iter::once
};

/**
Interleaves a separator between the items of an iterator. The separator is computed from the item that follows it.

```ignore
let iter = ["Int", "Bool"].iter().cloned();
assert_eq!(join_iter(iter, |_| " ").collect::<String>(), "Int Bool");
```
*/
pub fn join_iter<T>(mut iter: impl Iterator<Item = T>, sep: impl Fn(&T) -> T) -> impl Iterator<Item = T> {
  iter
      .next()
      .into_iter()
      .chain(iter.flat_map(move |s| once(sep(&s)).chain(once(s))))
}

/// Displays each item and joins the results with `sep`. Used for argument lists of terms and sorts.
pub fn join_string<T: Display>(iter: impl Iterator<Item = T>, sep: &str) -> String {
  join_iter(iter.map(|t| t.to_string()), |_| sep.to_string()).collect::<String>()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn separators_go_between_items() {
    let widths = [8, 16, 32].iter().cloned();
    let joined = join_iter(widths, |w| w / 2).collect::<Vec<_>>();
    assert_eq!(joined, vec![8, 8, 16, 16, 32]);

    assert_eq!(join_string(["Int", "Real"].iter(), " "), "Int Real");
    assert_eq!(join_string(std::iter::empty::<u32>(), ", "), "");
  }
}
