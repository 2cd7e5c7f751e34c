//! Segment functions.
//!
//! Each public operation here is invoked once per render cycle by the
//! prompt/status-line driver, queries the window manager through the
//! [`WindowManager`](crate::traits::WindowManager) trait, and returns zero
//! or more [`Segment`](crate::segment::Segment)s.

pub mod window;
pub mod workspaces;

//  Test doubles

#[cfg(test)]
pub(crate) mod mock {
    use crate::segment::{Output, Workspace};
    use crate::traits::WindowManager;
    use crate::tree::Node;

    #[derive(Debug, thiserror::Error)]
    #[error("mock error")]
    pub struct MockError;

    /// A [`WindowManager`] double returning canned state.
    ///
    /// `tree: None` makes `get_tree` fail, which doubles as an assertion
    /// that the code under test did not touch the tree.
    #[derive(Default)]
    pub struct MockWm {
        pub outputs: Vec<Output>,
        pub workspaces: Vec<Workspace>,
        pub tree: Option<Node>,
    }

    impl WindowManager for MockWm {
        type Error = MockError;

        fn get_outputs(&self) -> Result<Vec<Output>, MockError> {
            Ok(self.outputs.clone())
        }

        fn get_workspaces(&self) -> Result<Vec<Workspace>, MockError> {
            Ok(self.workspaces.clone())
        }

        fn get_tree(&self) -> Result<Node, MockError> {
            self.tree.clone().ok_or(MockError)
        }
    }

    pub fn output(name: &str, active: bool) -> Output {
        Output {
            name: name.into(),
            active,
        }
    }

    pub fn ws(name: &str, output: &str) -> Workspace {
        Workspace {
            name: name.into(),
            focused: false,
            urgent: false,
            visible: false,
            output: output.into(),
            dummy: false,
        }
    }
}
