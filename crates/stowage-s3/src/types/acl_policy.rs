//! Object access-control policies.

use aws_sdk_s3::types::{Grant, ObjectCannedAcl, Permission};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

/// Canonical URI of the group that represents anonymous users in grants.
pub(crate) const ALL_USERS_GROUP_URI: &str = "http://acs.amazonaws.com/groups/global/AllUsers";

/// Access-control policy applied to a stored object.
///
/// The string form of each variant is the wire vocabulary exchanged with the
/// service, so a policy round-trips exactly between a set call and a
/// subsequent get.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(Display, EnumString, IntoStaticStr)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum AclPolicy {
    /// Only the bucket owner may read or write the object.
    Private,
    /// Anyone may read; only the owner may write.
    PublicRead,
    /// Anyone may read and write.
    PublicReadWrite,
    /// The object inherits the bucket's access policy.
    Default,
}

impl AclPolicy {
    /// Returns the canned ACL value sent to the service.
    pub fn to_canned_acl(self) -> ObjectCannedAcl {
        match self {
            AclPolicy::Private => ObjectCannedAcl::Private,
            AclPolicy::PublicRead => ObjectCannedAcl::PublicRead,
            AclPolicy::PublicReadWrite => ObjectCannedAcl::PublicReadWrite,
            // Not part of the standard canned set; passed through verbatim
            // for stores that honor a bucket-inherited default.
            AclPolicy::Default => ObjectCannedAcl::from("default"),
        }
    }

    /// Derives the policy from the grant list returned by the service.
    ///
    /// Grants to the anonymous AllUsers group determine the public level.
    /// A grant set carrying only owner grants is [`AclPolicy::Private`];
    /// a layout that matches no canned policy maps to [`AclPolicy::Default`].
    pub fn from_grants(grants: &[Grant]) -> Self {
        let mut public_read = false;
        let mut public_write = false;

        for grant in grants {
            let Some(grantee) = grant.grantee() else {
                continue;
            };

            if grantee.uri() != Some(ALL_USERS_GROUP_URI) {
                continue;
            }

            match grant.permission().map(Permission::as_str) {
                Some("READ") => public_read = true,
                Some("WRITE") => public_write = true,
                Some("FULL_CONTROL") => {
                    public_read = true;
                    public_write = true;
                }
                _ => {}
            }
        }

        match (public_read, public_write) {
            (true, true) => AclPolicy::PublicReadWrite,
            (true, false) => AclPolicy::PublicRead,
            (false, true) => AclPolicy::Default,
            (false, false) => AclPolicy::Private,
        }
    }

    /// Returns whether the policy allows anonymous reads.
    pub fn is_public(&self) -> bool {
        matches!(self, AclPolicy::PublicRead | AclPolicy::PublicReadWrite)
    }
}
