/*
 * SPDX-FileCopyrightText: 2026 RedHunt07 - FEDI3 Project
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use serde::{Serialize, Serializer};
use serde_json::Value;
use std::fmt;

/// Nested objects deeper than this are kept as bare IRIs.
const MAX_NESTING: usize = 4;

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("invalid activity json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("activity is not a json object")]
    NotAnObject,
    #[error("activity has no type")]
    MissingType,
}

/// Type tag of an activity or object.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ApType {
    Accept,
    Announce,
    AnnounceRequest,
    Block,
    Create,
    Delete,
    Flag,
    Follow,
    Like,
    LikeRequest,
    Move,
    Reject,
    ReplyRequest,
    Undo,
    Update,
    Note,
    Article,
    Question,
    Application,
    Group,
    Organization,
    Person,
    Service,
    Profile,
    Tombstone,
    Unknown(String),
}

impl ApType {
    pub fn parse(name: &str) -> Self {
        match name.trim() {
            "Accept" => Self::Accept,
            "Announce" => Self::Announce,
            "AnnounceRequest" => Self::AnnounceRequest,
            "Block" => Self::Block,
            "Create" => Self::Create,
            "Delete" => Self::Delete,
            "Flag" => Self::Flag,
            "Follow" => Self::Follow,
            "Like" => Self::Like,
            "LikeRequest" => Self::LikeRequest,
            "Move" => Self::Move,
            "Reject" => Self::Reject,
            "ReplyRequest" => Self::ReplyRequest,
            "Undo" => Self::Undo,
            "Update" => Self::Update,
            "Note" => Self::Note,
            "Article" => Self::Article,
            "Question" => Self::Question,
            "Application" => Self::Application,
            "Group" => Self::Group,
            "Organization" => Self::Organization,
            "Person" => Self::Person,
            "Service" => Self::Service,
            "Profile" => Self::Profile,
            "Tombstone" => Self::Tombstone,
            other => Self::Unknown(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Accept => "Accept",
            Self::Announce => "Announce",
            Self::AnnounceRequest => "AnnounceRequest",
            Self::Block => "Block",
            Self::Create => "Create",
            Self::Delete => "Delete",
            Self::Flag => "Flag",
            Self::Follow => "Follow",
            Self::Like => "Like",
            Self::LikeRequest => "LikeRequest",
            Self::Move => "Move",
            Self::Reject => "Reject",
            Self::ReplyRequest => "ReplyRequest",
            Self::Undo => "Undo",
            Self::Update => "Update",
            Self::Note => "Note",
            Self::Article => "Article",
            Self::Question => "Question",
            Self::Application => "Application",
            Self::Group => "Group",
            Self::Organization => "Organization",
            Self::Person => "Person",
            Self::Service => "Service",
            Self::Profile => "Profile",
            Self::Tombstone => "Tombstone",
            Self::Unknown(name) => name,
        }
    }

    /// Object types that become statuses once stored.
    pub fn is_statusable(&self) -> bool {
        matches!(self, Self::Note | Self::Article | Self::Question)
    }

    pub fn is_actor(&self) -> bool {
        matches!(
            self,
            Self::Application | Self::Group | Self::Organization | Self::Person | Self::Service
        )
    }
}

impl fmt::Display for ApType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ApType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A property value that is either an inlined object or just its IRI.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ObjectRef {
    Iri(String),
    Object(Box<ApObject>),
}

impl ObjectRef {
    pub fn id(&self) -> Option<&str> {
        match self {
            Self::Iri(iri) => Some(iri),
            Self::Object(obj) => obj.id.as_deref(),
        }
    }

    pub fn as_object(&self) -> Option<&ApObject> {
        match self {
            Self::Iri(_) => None,
            Self::Object(obj) => Some(obj),
        }
    }
}

/// An embedded object: a Note, or an activity nested inside another one
/// (the Follow inside an Accept, the Like inside a LikeRequest).
#[derive(Debug, Clone, Serialize)]
pub struct ApObject {
    pub id: Option<String>,
    pub kind: ApType,
    pub actor: Vec<String>,
    pub object: Vec<ObjectRef>,
    pub target: Vec<String>,
    pub attributed_to: Vec<String>,
    pub in_reply_to: Vec<String>,
    pub approved_by: Option<String>,
    pub name: Option<String>,
    pub content: Option<String>,
    pub mentions: Vec<String>,
    #[serde(skip)]
    pub raw: Value,
}

impl ApObject {
    pub fn from_value(v: &Value) -> Option<Self> {
        decode_object(v, 0)
    }

    pub fn object_iris(&self) -> Vec<&str> {
        self.object.iter().filter_map(ObjectRef::id).collect()
    }
}

/// An inbound activity in decoded form.
#[derive(Debug, Clone)]
pub struct Activity {
    pub id: Option<String>,
    pub kind: ApType,
    pub actor: Vec<ObjectRef>,
    pub object: Vec<ObjectRef>,
    pub target: Vec<String>,
    pub instrument: Vec<ObjectRef>,
    pub content: Option<String>,
    pub raw: Value,
}

impl Activity {
    pub fn from_value(v: &Value) -> Result<Self, DecodeError> {
        let map = v.as_object().ok_or(DecodeError::NotAnObject)?;
        let kind = type_of(map.get("type")).ok_or(DecodeError::MissingType)?;
        Ok(Self {
            id: str_field(map.get("id")),
            kind,
            actor: refs(map.get("actor"), 1),
            object: refs(map.get("object"), 1),
            target: iris(map.get("target")),
            instrument: refs(map.get("instrument"), 1),
            content: str_field(map.get("content")),
            raw: v.clone(),
        })
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, DecodeError> {
        let v: Value = serde_json::from_slice(bytes)?;
        Self::from_value(&v)
    }

    pub fn actor_iris(&self) -> Vec<&str> {
        self.actor.iter().filter_map(ObjectRef::id).collect()
    }

    pub fn object_iris(&self) -> Vec<&str> {
        self.object.iter().filter_map(ObjectRef::id).collect()
    }
}

fn decode_object(v: &Value, depth: usize) -> Option<ApObject> {
    let map = v.as_object()?;
    let kind = type_of(map.get("type")).unwrap_or_else(|| ApType::Unknown(String::new()));
    let nested = depth + 1;
    Some(ApObject {
        id: str_field(map.get("id")),
        kind,
        actor: iris(map.get("actor")),
        object: refs(map.get("object"), nested),
        target: iris(map.get("target")),
        attributed_to: iris(map.get("attributedTo")),
        in_reply_to: iris(map.get("inReplyTo")),
        approved_by: iris(map.get("approvedBy")).into_iter().next(),
        name: str_field(map.get("name")),
        content: str_field(map.get("content")),
        mentions: mentions(map.get("tag")),
        raw: v.clone(),
    })
}

fn type_of(v: Option<&Value>) -> Option<ApType> {
    match v? {
        Value::String(s) if !s.trim().is_empty() => Some(ApType::parse(s)),
        // Multi-typed objects: the first entry is the ActivityStreams one in practice.
        Value::Array(arr) => arr
            .iter()
            .filter_map(|t| t.as_str())
            .map(str::trim)
            .find(|t| !t.is_empty())
            .map(ApType::parse),
        _ => None,
    }
}

fn str_field(v: Option<&Value>) -> Option<String> {
    v.and_then(|v| v.as_str())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
}

fn iri_of(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.trim().to_string()).filter(|s| !s.is_empty()),
        Value::Object(map) => str_field(map.get("id")),
        _ => None,
    }
}

fn iris(v: Option<&Value>) -> Vec<String> {
    match v {
        Some(Value::Array(arr)) => arr.iter().filter_map(iri_of).collect(),
        Some(other) => iri_of(other).into_iter().collect(),
        None => Vec::new(),
    }
}

fn ref_of(v: &Value, depth: usize) -> Option<ObjectRef> {
    match v {
        Value::String(_) => iri_of(v).map(ObjectRef::Iri),
        Value::Object(map) => {
            // An object without a type carries nothing beyond its id.
            if depth >= MAX_NESTING || type_of(map.get("type")).is_none() {
                return iri_of(v).map(ObjectRef::Iri);
            }
            decode_object(v, depth).map(|o| ObjectRef::Object(Box::new(o)))
        }
        _ => None,
    }
}

fn refs(v: Option<&Value>, depth: usize) -> Vec<ObjectRef> {
    match v {
        Some(Value::Array(arr)) => arr.iter().filter_map(|it| ref_of(it, depth)).collect(),
        Some(other) => ref_of(other, depth).into_iter().collect(),
        None => Vec::new(),
    }
}

fn mentions(v: Option<&Value>) -> Vec<String> {
    let items: Vec<&Value> = match v {
        Some(Value::Array(arr)) => arr.iter().collect(),
        Some(other) => vec![other],
        None => return Vec::new(),
    };
    items
        .into_iter()
        .filter(|t| t.get("type").and_then(|v| v.as_str()) == Some("Mention"))
        .filter_map(|t| str_field(t.get("href")))
        .collect()
}
