//! This module stores the expected format of the arguments for the
//! requests. Each struct maps to one endpoint in
//! [`crate::const_config::path`]. The multipart upload payloads are not
//! serializable as a whole; their field order is documented on the struct
//! and assembled by the client.

use std::fmt::Debug;

use secrecy::{ExposeSecret, SecretString};

use crate::{
    cosmetics::CosmeticKind, id::CosmeticId, player::PlayerUsername, updates::UpdateBranch,
};

/// `POST /auth/login`
#[derive(Clone)]
pub struct LoginReqArgs {
    pub email: String,
    pub password: SecretString,
}

impl LoginReqArgs {
    pub fn new<S: Into<String>>(email: S, password: SecretString) -> Self {
        Self {
            email: email.into(),
            password,
        }
    }
}

impl Debug for LoginReqArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginReqArgs")
            .field("email", &self.email)
            .field("has_password", &!self.password.expose_secret().is_empty())
            .finish()
    }
}

/// A file picked for upload, already read into memory
#[derive(Clone, PartialEq, Eq)]
pub struct FileAttachment {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl FileAttachment {
    pub fn new<S: Into<String>>(file_name: S, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }
}

impl Debug for FileAttachment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileAttachment")
            .field("file_name", &self.file_name)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// `POST /admin/add_cosmetics` (multipart)
///
/// Parts: texture(s), preview, type, name, price, normal_price, sale_price,
/// category, is_private, is_animated, frame_delay, shoulders?
#[derive(Debug, Clone)]
pub struct AddCosmeticsReqArgs {
    pub kind: CosmeticKind,
    pub name: String,
    pub category: String,
    pub price: u32,
    pub is_private: bool,
    pub is_animated: bool,
    /// Milliseconds between animation frames, `0` unless animated
    pub frame_delay: u32,
    /// Animated cosmetics send one texture part per frame
    pub textures: Vec<FileAttachment>,
    pub preview: FileAttachment,
    pub shoulders: Option<FileAttachment>,
}

/// `POST /admin/give_cosmetic`
#[derive(Debug, serde::Serialize, Clone)]
pub struct GiveCosmeticReqArgs {
    #[serde(rename = "type")]
    pub kind: CosmeticKind,
    pub username: PlayerUsername,
    pub cosmetics_id: CosmeticId,
}

/// `POST /admin/give_plus`
#[derive(Debug, serde::Serialize, Clone)]
pub struct GivePlusReqArgs {
    pub username: PlayerUsername,
    /// Date the subscription runs out, `YYYY-MM-DD`
    pub plus_expiration: String,
}

/// `POST /admin/add_news` (multipart)
///
/// Parts: cover, title, body, tags
#[derive(Debug, Clone)]
pub struct AddNewsReqArgs {
    pub title: String,
    pub body: String,
    /// Comma separated list as typed by the operator
    pub tags: String,
    pub cover: FileAttachment,
}

/// `POST /updates/update_version` (multipart)
///
/// Parts: jar, version, branch, description
#[derive(Debug, Clone)]
pub struct UpdateVersionReqArgs {
    pub branch: UpdateBranch,
    pub version: String,
    pub description: String,
    pub jar: FileAttachment,
}

/// `POST /updates/update_launcher` (multipart)
///
/// Parts: exe, version, description
#[derive(Debug, Clone)]
pub struct UpdateLauncherReqArgs {
    pub version: String,
    pub description: String,
    pub exe: FileAttachment,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn give_cosmetic_serializes_with_wire_field_names() {
        let args = GiveCosmeticReqArgs {
            kind: CosmeticKind::Capes,
            username: "Steve".try_into().unwrap(),
            cosmetics_id: 42.into(),
        };

        let json = serde_json::to_value(&args).unwrap();

        assert_eq!(
            json,
            serde_json::json!({"type": "capes", "username": "steve", "cosmetics_id": 42})
        );
    }

    #[test]
    fn login_args_debug_does_not_leak_the_password() {
        let args = LoginReqArgs::new("a@b.com", "hunter2".to_string().into());
        let debug = format!("{args:?}");
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("has_password"));
    }
}
