crate::define_id_enum! {
    /// Language ecosystem identifier
    LanguageId {
        Node => "node" : "Node.js",
        Python => "python" : "Python",
        Go => "go" : "Go",
        Rust => "rust" : "Rust",
        Ruby => "ruby" : "Ruby",
        Elixir => "elixir" : "Elixir",
        Php => "php" : "PHP",
        Java => "java" : "Java",
    }
}
