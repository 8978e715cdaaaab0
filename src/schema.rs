table! {
    push_subscriptions (id) {
        id -> Int4,
        user_id -> Uuid,
        endpoint -> Text,
        auth -> Text,
        p256dh -> Text,
        last_reminder_at -> Nullable<Timestamptz>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

table! {
    savings_entries (id) {
        id -> Int4,
        user_id -> Uuid,
        week_number -> Int4,
        amount -> Int8,
        is_saved -> Bool,
        saved_at -> Nullable<Timestamptz>,
    }
}

table! {
    sessions (token) {
        token -> Text,
        user_id -> Uuid,
        expires_at -> Timestamptz,
    }
}
