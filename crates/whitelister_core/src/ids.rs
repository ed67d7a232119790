//! Platform snowflake identifiers.
//!
//! Discord identifiers are unsigned 64-bit integers. SQLite stores signed
//! 64-bit integers, so every id converts to and from `i64` by bit-cast.

macro_rules! snowflake {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Clone,
            Copy,
            Default,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            derive_more::Display,
            derive_more::From,
        )]
        #[display("{}", _0)]
        pub struct $name(pub u64);

        impl $name {
            /// Raw snowflake value.
            pub fn get(self) -> u64 {
                self.0
            }

            /// Representation used in the database.
            pub fn to_db(self) -> i64 {
                self.0 as i64
            }

            /// Restore an id read from the database.
            pub fn from_db(value: i64) -> Self {
                Self(value as u64)
            }
        }
    };
}

snowflake!(
    /// A guild (community workspace).
    GuildId
);
snowflake!(
    /// A text channel inside a guild.
    ChannelId
);
snowflake!(
    /// A guild role.
    RoleId
);
snowflake!(
    /// A platform user.
    UserId
);
snowflake!(
    /// A single chat message.
    MessageId
);

impl ChannelId {
    /// Channel mention markup, e.g. `<#555>`.
    pub fn mention(self) -> String {
        format!("<#{}>", self.0)
    }
}

impl RoleId {
    /// Role mention markup, e.g. `<@&777>`.
    pub fn mention(self) -> String {
        format!("<@&{}>", self.0)
    }
}

impl UserId {
    /// User mention markup, e.g. `<@42>`.
    pub fn mention(self) -> String {
        format!("<@{}>", self.0)
    }
}
