//! Diesel schema for task and assignment persistence.

diesel::table! {
    /// Task records. Rows are soft-deleted through `active`.
    tasks (id) {
        /// Store-assigned task identifier.
        id -> Int8,
        /// Sanitised title.
        #[max_length = 255]
        title -> Varchar,
        /// Optional sanitised description.
        description -> Nullable<Text>,
        /// Task priority.
        #[max_length = 20]
        priority -> Varchar,
        /// Workflow status.
        #[max_length = 20]
        status -> Varchar,
        /// Visibility flag; `false` once soft-deleted.
        active -> Bool,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
        /// Owning project identifier.
        project_id -> Int8,
        /// Legacy primary assignee.
        assigned_user_id -> Nullable<Int8>,
    }
}

diesel::table! {
    /// Task-to-user assignment links, unique per `(task_id, user_id)`.
    task_users (id) {
        /// Synthetic row identifier.
        id -> Int8,
        /// Linked task.
        task_id -> Int8,
        /// Linked user.
        user_id -> Int8,
        /// Most recent assignment timestamp.
        assigned_at -> Timestamptz,
        /// `true` while the user is currently assigned.
        active -> Bool,
    }
}

diesel::joinable!(task_users -> tasks (task_id));
diesel::allow_tables_to_appear_in_same_query!(tasks, task_users);
