//! Named slide hooks. Flow files refer to hooks by name through `onShow` and
//! `onEnd`; the embedding application registers what each name does.

use std::{collections::HashMap, fmt};

use shared::{HookName, Slide};
use tracing::warn;

/// What a hook sees when it fires.
#[derive(Debug, Clone, Copy)]
pub struct HookContext<'a> {
    pub slide: &'a Slide,
    pub index: usize,
    pub total: usize,
}

type Hook = Box<dyn FnMut(&HookContext<'_>)>;

#[derive(Default)]
pub struct HookRegistry {
    hooks: HashMap<HookName, Hook>,
}

impl HookRegistry {
    pub fn register<F>(&mut self, name: impl Into<String>, hook: F)
    where
        F: FnMut(&HookContext<'_>) + 'static,
    {
        self.hooks.insert(HookName::new(name), Box::new(hook));
    }

    pub fn unregister(&mut self, name: &str) -> bool {
        self.hooks.remove(&HookName::new(name)).is_some()
    }

    pub fn contains(&self, name: &HookName) -> bool {
        self.hooks.contains_key(name)
    }

    /// Runs the hook registered under `name`. Unknown names are logged and
    /// skipped.
    pub fn run(&mut self, name: &HookName, context: &HookContext<'_>) -> bool {
        match self.hooks.get_mut(name) {
            Some(hook) => {
                hook(context);
                true
            }
            None => {
                warn!(hook = %name, slide = context.index + 1, "tour: hook not registered");
                false
            }
        }
    }
}

impl fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.hooks.keys().map(HookName::as_str).collect();
        names.sort_unstable();
        f.debug_struct("HookRegistry").field("hooks", &names).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{cell::RefCell, rc::Rc};

    #[test]
    fn runs_registered_hook_with_context() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut registry = HookRegistry::default();
        let sink = seen.clone();
        registry.register("track", move |ctx| {
            sink.borrow_mut().push((ctx.slide.title.clone(), ctx.index, ctx.total));
        });

        let slide = Slide::new("Intro", "hello");
        let ran = registry.run(
            &HookName::new("track"),
            &HookContext {
                slide: &slide,
                index: 2,
                total: 5,
            },
        );

        assert!(ran);
        assert_eq!(*seen.borrow(), vec![("Intro".to_string(), 2, 5)]);
    }

    #[test]
    fn unknown_hook_is_skipped() {
        let mut registry = HookRegistry::default();
        let slide = Slide::new("t", "b");
        let context = HookContext {
            slide: &slide,
            index: 0,
            total: 1,
        };
        assert!(!registry.run(&HookName::new("missing"), &context));

        registry.register("once", |_| {});
        assert!(registry.contains(&HookName::new("once")));
        assert!(registry.unregister("once"));
        assert!(!registry.run(&HookName::new("once"), &context));
    }
}
