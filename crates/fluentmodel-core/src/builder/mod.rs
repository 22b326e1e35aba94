//! Builder tree: the node trait, the child-set composition mixin, and the
//! type and member builders.
//!
//! Every node owns its children. Registration moves a child into its parent's
//! [`BuilderSet`] and hands back a typed `&mut` to it, so fluent chains keep
//! going on the child after it has been registered. Finalize (`build`) walks
//! the tree depth-first in registration order.

pub mod accumulator;
pub mod member;
pub mod sink;
pub mod type_builder;

use std::any::Any;
use std::fmt;

use fluentmodel_types::descriptor::TypeDescriptor;

pub use accumulator::Accumulator;
pub use member::MemberBuilder;
pub use sink::DirectiveSink;
pub use type_builder::TypeBuilder;

/// Owned, type-erased builder node.
pub type BoxedBuilder = Box<dyn Builder>;

/// A node of the builder tree.
pub trait Builder: Any {
    /// Finalize: build every child in registration order, then materialize
    /// this node's own accumulated state. Safe to call more than once.
    fn build(&mut self);

    /// Registered children, in registration order.
    fn builders(&self) -> &[BoxedBuilder];

    /// The type descriptor this node configures. Only type builders have one.
    fn type_descriptor(&self) -> Option<&TypeDescriptor> {
        None
    }

    fn as_any_mut(&mut self) -> &mut dyn Any;

    fn boxed(self) -> BoxedBuilder
    where
        Self: Sized,
    {
        Box::new(self)
    }
}

// ---------------------------------------------------------------------------
// BuilderSet
// ---------------------------------------------------------------------------

/// Ordered set of child builders owned by one node.
#[derive(Default)]
pub struct BuilderSet {
    builders: Vec<BoxedBuilder>,
}

impl BuilderSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an already boxed child.
    pub fn push(&mut self, builder: BoxedBuilder) {
        self.builders.push(builder);
    }

    /// Append a child and return a typed handle to it.
    pub fn register<B: Builder>(&mut self, builder: B) -> &mut B {
        self.builders.push(Box::new(builder));
        self.builders
            .last_mut()
            .and_then(|last| last.as_any_mut().downcast_mut::<B>())
            .expect("the builder pushed last has type B")
    }

    /// Finalize every child in registration order.
    pub fn build_all(&mut self) {
        for builder in &mut self.builders {
            builder.build();
        }
    }

    pub fn as_slice(&self) -> &[BoxedBuilder] {
        &self.builders
    }

    pub fn len(&self) -> usize {
        self.builders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.builders.is_empty()
    }
}

impl fmt::Debug for BuilderSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuilderSet")
            .field("len", &self.builders.len())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// BuilderManager
// ---------------------------------------------------------------------------

/// Registration capability shared by every node that can have children.
///
/// Feature builders defined outside this crate attach themselves to a member
/// builder through this trait alone.
pub trait BuilderManager {
    fn builder_set(&mut self) -> &mut BuilderSet;

    fn add_builder(&mut self, builder: BoxedBuilder) {
        self.builder_set().push(builder);
    }

    fn register_child<B: Builder>(&mut self, builder: B) -> &mut B
    where
        Self: Sized,
    {
        self.builder_set().register(builder)
    }
}

/// Visit `builders` and all their descendants depth-first, parents first.
pub fn walk<'a>(builders: &'a [BoxedBuilder], visit: &mut impl FnMut(&'a dyn Builder)) {
    for builder in builders {
        visit(builder.as_ref());
        walk(builder.builders(), visit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::cell::RefCell;
    use std::rc::Rc;

    /// Records its label into a shared log on every build.
    struct Recorder {
        label: &'static str,
        log: Rc<RefCell<Vec<&'static str>>>,
        children: BuilderSet,
    }

    impl Recorder {
        fn new(label: &'static str, log: &Rc<RefCell<Vec<&'static str>>>) -> Self {
            Self {
                label,
                log: Rc::clone(log),
                children: BuilderSet::new(),
            }
        }
    }

    impl Builder for Recorder {
        fn build(&mut self) {
            self.children.build_all();
            self.log.borrow_mut().push(self.label);
        }

        fn builders(&self) -> &[BoxedBuilder] {
            self.children.as_slice()
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    impl BuilderManager for Recorder {
        fn builder_set(&mut self) -> &mut BuilderSet {
            &mut self.children
        }
    }

    #[test]
    fn test_register_returns_typed_handle() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut set = BuilderSet::new();

        let recorder = set.register(Recorder::new("a", &log));
        recorder.label = "renamed";

        assert_eq!(set.len(), 1);
        set.build_all();
        assert_eq!(*log.borrow(), vec!["renamed"]);
    }

    #[test]
    fn test_build_is_depth_first_children_before_parent() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut root = Recorder::new("root", &log);

        let left = root.register_child(Recorder::new("left", &log));
        left.register_child(Recorder::new("left.child", &log));
        root.add_builder(Recorder::new("right", &log).boxed());

        root.build();
        assert_eq!(*log.borrow(), vec!["left.child", "left", "right", "root"]);
    }

    #[test]
    fn test_walk_visits_parents_first_in_registration_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut set = BuilderSet::new();
        let first = set.register(Recorder::new("first", &log));
        first.register_child(Recorder::new("nested", &log));
        set.register(Recorder::new("second", &log));

        let mut seen = 0;
        walk(set.as_slice(), &mut |node| {
            assert!(node.type_descriptor().is_none());
            seen += 1;
        });
        assert_eq!(seen, 3);
    }

    #[test]
    fn test_empty_set() {
        let set = BuilderSet::new();
        assert!(set.is_empty());
        assert_eq!(format!("{set:?}"), "BuilderSet { len: 0 }");
    }
}
