// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

/// Implemented by resources that report a lifecycle state.
///
/// Resources without a lifecycle state can implement this trait and keep the
/// default. A waiter never considers such resources as having reached a
/// target state.
///
/// # Example
/// ```
/// # use cloudsdk_waiter::Lifecycle;
/// struct Vcn {
///     lifecycle_state: String,
/// }
/// impl Lifecycle for Vcn {
///     fn lifecycle_state(&self) -> Option<&str> {
///         Some(self.lifecycle_state.as_str())
///     }
/// }
/// ```
pub trait Lifecycle {
    /// The current lifecycle state, if the resource has one.
    fn lifecycle_state(&self) -> Option<&str> {
        None
    }
}

/// Implemented by resources that carry their own identifier.
///
/// Composite operations use the identifier returned by a create, update, or
/// action call to poll the resource.
pub trait Identified {
    /// The resource identifier, if known.
    fn identifier(&self) -> Option<&str>;
}

/// The set of lifecycle states a waiter is waiting for.
///
/// States are compared without regard to ASCII case, `"Available"` matches a
/// resource reporting `"AVAILABLE"`.
///
/// # Example
/// ```
/// # use cloudsdk_waiter::TargetStates;
/// let states = TargetStates::from(["AVAILABLE", "Terminated"]);
/// assert!(states.contains("available"));
/// assert!(states.contains("TERMINATED"));
/// assert!(!states.contains("PROVISIONING"));
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TargetStates(Vec<String>);

impl TargetStates {
    /// Creates a set of target states.
    pub fn new<I, V>(states: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        Self(states.into_iter().map(Into::into).collect())
    }

    /// Returns true if there are no target states.
    ///
    /// Composite operations do not wait when called with an empty set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the states, in the order they were provided.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Returns true if `state` is one of the target states.
    pub fn contains(&self, state: &str) -> bool {
        self.0.iter().any(|s| s.eq_ignore_ascii_case(state))
    }

    /// Returns true if the observation reports one of the target states.
    ///
    /// Observations without a lifecycle state never match.
    pub fn matches<T: Lifecycle + ?Sized>(&self, observation: &T) -> bool {
        observation
            .lifecycle_state()
            .is_some_and(|state| self.contains(state))
    }
}

impl<V: Into<String>> FromIterator<V> for TargetStates {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl<V: Into<String>, const N: usize> From<[V; N]> for TargetStates {
    fn from(value: [V; N]) -> Self {
        Self::new(value)
    }
}

impl<V: Into<String>> From<Vec<V>> for TargetStates {
    fn from(value: Vec<V>) -> Self {
        Self::new(value)
    }
}
