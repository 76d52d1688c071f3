// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

/// A marker trait for types that can be used as components in the ECS.
///
/// This trait must be implemented (usually through `#[derive(Component)]`)
/// for any struct you wish to attach to an entity. The `'static` bound ensures
/// the component owns its data; the store is single-threaded, so no `Send`
/// or `Sync` bound is required.
pub trait Component: 'static {}

/// Short type name used in diagnostics (`Health` rather than `my_game::components::Health`).
///
/// Generic types keep their full path so their parameters stay readable.
pub(crate) fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    if full.contains('<') {
        return full;
    }
    full.rsplit("::").next().unwrap_or(full)
}
