/*!

Text representations of terms and sorts. There are several, and which one we want depends on the context:

| style     | `(and x (bvult a b))` renders as          |
|:----------|:------------------------------------------|
| `Default` | `(and x (bvult a b))`                     |
| `Simple`  | `AND(x, BITVECTOR_ULT(a, b))`             |
| `Debug`   | `(and x#4 (bvult a#2 b#3)#5)#6`           |

`Default` is SMT-LIB-like concrete syntax. `Debug` appends each node's creation id, which tells apart distinct
variables with the same name.

*/

use std::{
  fmt::Display,
  io::{self, Write}
};

use crate::{
  abstractions::join_string,
  api::kind::Kind,
  core::{
    allocator::SlotIndex,
    manager_core::ManagerCore,
    node::NodePayload,
    sort::SortPayload
  }
};

#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub enum FormatStyle {
  #[default]
  Default, // SMT-LIB-like concrete syntax
  Simple,  // Kind names in function-call notation
  Debug,   // Default, plus creation ids
}

pub trait Formattable {
  /// Writes a text representation of `self` according to the given `FormatStyle`.
  fn repr(&self, style: FormatStyle) -> String;
}

impl Display for dyn Formattable {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", Formattable::repr(self, FormatStyle::Default))
  }
}

// region Terms

/// A pending piece of output. Terms can be arbitrarily deep, so printing walks them with an explicit worklist.
enum Step {
  Node(SlotIndex),
  Text(&'static str),
  SortOf(SlotIndex),
  Id(SlotIndex),
}

pub(crate) fn node_repr(core: &ManagerCore, node: SlotIndex, style: FormatStyle) -> String {
  let mut accumulator = String::new();
  let mut worklist    = vec![Step::Node(node)];

  while let Some(step) = worklist.pop() {
    match step {
      Step::Node(node) => write_node(core, node, style, &mut accumulator, &mut worklist),
      Step::Text(text) => accumulator.push_str(text),
      Step::SortOf(variable) => match core.node_sort(variable) {
        Some(sort) => accumulator.push_str(&sort_repr(core, sort)),
        None => accumulator.push('?'),
      },
      Step::Id(node) => {
        accumulator.push('#');
        accumulator.push_str(&core.nodes.id(node).to_string());
      }
    }
  }

  accumulator
}

/// Writes the head of `node` and schedules the rest of it on `worklist`.
fn write_node(
  core       : &ManagerCore,
  node       : SlotIndex,
  style      : FormatStyle,
  accumulator: &mut String,
  worklist   : &mut Vec<Step>,
) {
  let key       = core.node_key(node);
  let mut steps = Vec::new();

  if style == FormatStyle::Debug {
    worklist.push(Step::Id(node));
  }

  match &key.payload {

    NodePayload::Symbol { name, .. } => {
      accumulator.push_str(name);
    }

    NodePayload::Constant(constant) => {
      accumulator.push_str(&constant.to_string());
    }

    NodePayload::None if style == FormatStyle::Simple => {
      accumulator.push_str(key.kind.name());
      accumulator.push('(');
      for (position, &child) in key.children.iter().enumerate() {
        if position > 0 {
          steps.push(Step::Text(", "));
        }
        steps.push(Step::Node(child));
      }
      steps.push(Step::Text(")"));
    }

    NodePayload::None if key.kind == Kind::BoundVarList => {
      // ((x Int) (y Int))
      accumulator.push('(');
      for (position, &variable) in key.children.iter().enumerate() {
        if position > 0 {
          steps.push(Step::Text(" "));
        }
        steps.extend([Step::Text("("), Step::Node(variable), Step::Text(" "), Step::SortOf(variable), Step::Text(")")]);
      }
      steps.push(Step::Text(")"));
    }

    NodePayload::None if key.kind.is_parameterized() => {
      // The operator is the first child.
      accumulator.push('(');
      for (position, &child) in key.children.iter().enumerate() {
        if position > 0 {
          steps.push(Step::Text(" "));
        }
        steps.push(Step::Node(child));
      }
      steps.push(Step::Text(")"));
    }

    NodePayload::None => {
      accumulator.push('(');
      accumulator.push_str(key.kind.symbol());
      for &child in key.children.iter() {
        steps.extend([Step::Text(" "), Step::Node(child)]);
      }
      steps.push(Step::Text(")"));
    }

  }

  worklist.extend(steps.into_iter().rev());
}

/// A node waiting to be drawn by the tree printer, or the point where its subtree ends.
enum TreeStep {
  Node { node: SlotIndex, branch: &'static str, extension: &'static str },
  Truncate(usize),
}

/// Prints the term as a tree, one node per line, using box-drawing characters. Shared subterms are printed once per
/// occurrence.
pub(crate) fn write_tree(core: &ManagerCore, root: SlotIndex, indent: usize, out: &mut dyn Write) -> io::Result<()> {
  let mut prefix   = " ".repeat(indent);
  let mut worklist = vec![TreeStep::Node { node: root, branch: "", extension: " " }];

  while let Some(step) = worklist.pop() {
    let (node, branch, extension) = match step {
      TreeStep::Node { node, branch, extension } => (node, branch, extension),
      TreeStep::Truncate(length) => {
        prefix.truncate(length);
        continue;
      }
    };

    let key   = core.node_key(node);
    let label = match &key.payload {
      NodePayload::None => key.kind.name().to_string(),
      _ => node_repr(core, node, FormatStyle::Default),
    };
    writeln!(out, "{}{}{}", prefix, branch, label)?;

    if key.children.is_empty() {
      continue;
    }
    worklist.push(TreeStep::Truncate(prefix.len()));
    prefix.push_str(extension);
    let last = key.children.len() - 1;
    for (position, &child) in key.children.iter().enumerate().rev() {
      let (branch, extension) = if position == last { ("╰──", "    ") } else { ("├──", "│   ") };
      worklist.push(TreeStep::Node { node: child, branch, extension });
    }
  }

  Ok(())
}

// endregion Terms

// region Sorts

pub(crate) fn sort_repr(core: &ManagerCore, sort: SlotIndex) -> String {
  let key      = core.sort_key(sort);
  let children = || join_string(key.children.iter().map(|&child| sort_repr(core, child)), " ");

  match (&key.payload, key.kind) {

    (SortPayload::Width(width), _) => format!("(_ BitVec {})", width),

    (SortPayload::FloatingPoint { exponent, significand }, _) => {
      format!("(_ FloatingPoint {} {})", exponent, significand)
    }

    (SortPayload::Name(name), _) | (SortPayload::SortConstructor { name, .. }, _) => {
      if key.children.is_empty() {
        name.to_string()
      } else {
        format!("({} {})", name, children())
      }
    }

    (SortPayload::Datatype(index), _) => {
      let definition = core.datatype(*index);
      let arguments  = match &definition.instance_of {
        Some((_, arguments)) => arguments.as_slice(),
        None => key.children.as_slice(),
      };
      if arguments.is_empty() {
        definition.name.to_string()
      } else {
        let arguments = arguments.iter().map(|&argument| sort_repr(core, argument));
        format!("({} {})", definition.name, join_string(arguments, " "))
      }
    }

    (SortPayload::None, kind) if key.children.is_empty() => kind.symbol().to_string(),

    (SortPayload::None, kind) => format!("({} {})", kind.symbol(), children()),

  }
}

// endregion Sorts
