#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod bucket;
pub mod classifier;
pub mod config;
pub mod dispatch;
pub mod header;
pub mod lifecycle;
pub mod models;
pub mod rules;

pub use bucket::{ScriptBucket, ScriptBucketFilter, ScriptClassification, is_admin_script, is_user_script};
pub use classifier::{matches_any, matches_none};
pub use config::PluginConfig;
pub use dispatch::{RequestDispatcher, RequestType, select_scripts};
pub use header::{AuthLevel, HeaderContext, MetaheaderPlan, plan_metaheader};
pub use lifecycle::{HostLifecycle, ToolbarAction, notify_toolbar};
pub use models::{ScriptDescriptor, ScriptEntry, ScriptSource};
pub use rules::{PathRuleSet, RuleSetError};
