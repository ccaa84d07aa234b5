//! Copies the media referenced by normalized records into durable storage.
//!
//! Each resolver consumes a record and returns a new one whose media
//! references carry `stored_url`. Failures are per asset: a reference that
//! cannot be stored is logged and comes back pointing at its source URL
//! while the rest of the record proceeds.

use std::collections::HashMap;

use socialsync_core::{MediaRef, Platform, ResourceKind, SocialAccount, SocialPost};

use crate::service::{destination_folder, MediaService};
use crate::storage::ObjectStore;
use crate::transcode::Transcoder;

/// Outcome counts for one resolve call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolveReport {
    pub stored: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Stores the account's avatars as `{platform}/profiles/{user_id}-avatar` and
/// `...-avatar-hd`.
pub async fn resolve_account_media<S: ObjectStore, T: Transcoder>(
    service: &MediaService<S, T>,
    account: SocialAccount,
) -> (SocialAccount, ResolveReport) {
    let mut run = Resolution::new(service, account.platform(), ResourceKind::Profiles);
    let user_id = &account.platform_user_id;

    let avatar = match account.avatar {
        Some(media) => Some(run.resolve(media, &format!("{user_id}-avatar")).await),
        None => None,
    };
    let avatar_hd = match account.avatar_hd {
        Some(media) => Some(run.resolve(media, &format!("{user_id}-avatar-hd")).await),
        None => None,
    };

    let resolved = SocialAccount {
        avatar,
        avatar_hd,
        ..account
    };
    (resolved, run.report)
}

/// Stores a post's media as `{platform}/posts/{post_id}-{n}` and its
/// thumbnail as `{post_id}-thumb`. An asset referenced twice (a video's
/// poster frame is both media and thumbnail) is uploaded once.
pub async fn resolve_post_media<S: ObjectStore, T: Transcoder>(
    service: &MediaService<S, T>,
    post: SocialPost,
) -> (SocialPost, ResolveReport) {
    let mut run = Resolution::new(service, post.platform(), ResourceKind::Posts);
    let post_id = &post.platform_post_id;

    let mut media = Vec::with_capacity(post.media.len());
    for (index, item) in post.media.into_iter().enumerate() {
        media.push(run.resolve(item, &format!("{post_id}-{index}")).await);
    }
    let thumbnail = match post.thumbnail {
        Some(thumb) => Some(run.resolve(thumb, &format!("{post_id}-thumb")).await),
        None => None,
    };

    let resolved = SocialPost {
        media,
        thumbnail,
        ..post
    };
    (resolved, run.report)
}

/// State for one resolve call: the destination folder, uploads already made
/// (by source URL), and the running counts.
struct Resolution<'a, S, T> {
    service: &'a MediaService<S, T>,
    folder: String,
    seen: HashMap<String, String>,
    report: ResolveReport,
}

impl<'a, S: ObjectStore, T: Transcoder> Resolution<'a, S, T> {
    fn new(service: &'a MediaService<S, T>, platform: Platform, kind: ResourceKind) -> Self {
        Self {
            service,
            folder: destination_folder(platform, kind),
            seen: HashMap::new(),
            report: ResolveReport::default(),
        }
    }

    async fn resolve(&mut self, media: MediaRef, name: &str) -> MediaRef {
        if media.stored_url.is_some() {
            self.report.skipped += 1;
            return media;
        }
        if let Some(url) = self.seen.get(&media.source_url) {
            self.report.skipped += 1;
            return MediaRef {
                stored_url: Some(url.clone()),
                ..media
            };
        }

        let stored = self
            .service
            .store_from_url(&media.source_url, &self.folder, Some(name))
            .await;
        match stored {
            Ok(url) => {
                self.seen.insert(media.source_url.clone(), url.clone());
                self.report.stored += 1;
                MediaRef {
                    stored_url: Some(url),
                    ..media
                }
            }
            Err(error) => {
                tracing::warn!(
                    source_url = %media.source_url,
                    %error,
                    "media not stored; keeping source URL"
                );
                self.report.failed += 1;
                media
            }
        }
    }
}
