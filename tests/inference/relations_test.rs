#[cfg(test)]
mod tests {
    use ermap::catalog::{Catalog, Column, ForeignKey, Index, Table};
    use ermap::inference::infer;
    use ermap::{EdgeDirection, Entity, InferenceError, RelationShape};
    use insta::assert_snapshot;
    use pretty_assertions::assert_eq;

    /// Builder form of one entity: fields, then edges.
    fn render(entity: &Entity) -> String {
        entity
            .fields
            .iter()
            .map(ToString::to_string)
            .chain(entity.edges.iter().map(ToString::to_string))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn user() -> Table {
        Table::new("user")
            .with_column(Column::new("id", "bigint"))
            .with_column(Column::new("age", "bigint"))
            .with_column(Column::new("name", "character varying"))
            .with_primary_key(["id"])
    }

    fn join_table(name: &str, left: (&str, &str), right: (&str, &str)) -> Table {
        Table::new(name)
            .with_column(Column::new(left.0, "bigint"))
            .with_column(Column::new(right.0, "bigint"))
            .with_primary_key([left.0, right.0])
            .with_foreign_key(ForeignKey::new(format!("{name}_{}", left.0), left.0, left.1, "id"))
            .with_foreign_key(ForeignKey::new(
                format!("{name}_{}", right.0),
                right.0,
                right.1,
                "id",
            ))
    }

    // ========================================================================
    // Two-type relations
    // ========================================================================

    #[test]
    fn test_o2m_two_types() {
        let catalog = Catalog::new("public").with_table(user()).with_table(
            Table::new("pet")
                .with_column(Column::new("id", "bigint"))
                .with_column(Column::new("name", "character varying"))
                .with_column(Column::new("user_pets", "bigint").nullable())
                .with_primary_key(["id"])
                .with_foreign_key(ForeignKey::new("pets_user_pets", "user_pets", "user", "id")),
        );

        let mutations = infer(&catalog).unwrap();
        assert_eq!(mutations.names().collect::<Vec<_>>(), vec!["User", "Pet"]);

        assert_snapshot!(render(mutations.get("User").unwrap()), @r#"
        int64("id")
        int64("age")
        string("name")
        to("pets", Pet)
        "#);
        assert_snapshot!(render(mutations.get("Pet").unwrap()), @r#"
        int64("id")
        string("name")
        int64("user_pets").optional()
        from("user", User).ref("pets").unique().field("user_pets")
        "#);
    }

    #[test]
    fn test_o2o_two_types() {
        let catalog = Catalog::new("public").with_table(user()).with_table(
            Table::new("card")
                .with_column(Column::new("id", "bigint"))
                .with_column(Column::new("number", "character varying"))
                .with_column(Column::new("user_card", "bigint").nullable())
                .with_primary_key(["id"])
                .with_index(Index::unique("card_user_card_key", ["user_card"]))
                .with_foreign_key(ForeignKey::new("cards_user_card", "user_card", "user", "id")),
        );

        let mutations = infer(&catalog).unwrap();
        let user = mutations.get("User").unwrap();
        let card = mutations.get("Card").unwrap();

        assert_snapshot!(user.edges[0].to_string(), @r#"to("card", Card).unique()"#);
        assert_snapshot!(render(card), @r#"
        int64("id")
        string("number")
        int64("user_card").optional().unique()
        from("user", User).ref("card").unique().field("user_card")
        "#);
        assert_eq!(card.edges[0].shape, RelationShape::O2O);
    }

    #[test]
    fn test_m2m_two_types() {
        let group = Table::new("group")
            .with_column(Column::new("id", "bigint"))
            .with_column(Column::new("name", "character varying"))
            .with_primary_key(["id"]);
        let catalog = Catalog::new("public")
            .with_table(group)
            .with_table(user())
            .with_table(join_table(
                "group_users",
                ("group_id", "group"),
                ("user_id", "user"),
            ));

        let mutations = infer(&catalog).unwrap();

        // The join table produces no entity of its own.
        assert_eq!(mutations.names().collect::<Vec<_>>(), vec!["Group", "User"]);
        assert!(mutations.by_table("group_users").is_none());

        let group = mutations.get("Group").unwrap();
        let user = mutations.get("User").unwrap();
        assert_eq!(
            group.edges.iter().map(ToString::to_string).collect::<Vec<_>>(),
            vec![r#"to("users", User)"#]
        );
        assert_eq!(
            user.edges.iter().map(ToString::to_string).collect::<Vec<_>>(),
            vec![r#"from("groups", Group).ref("users")"#]
        );
        assert!(user.edges[0].field.is_none());
    }

    #[test]
    fn test_o2o_shared_primary_key() {
        let catalog = Catalog::new("public").with_table(user()).with_table(
            Table::new("profile")
                .with_column(Column::new("user_id", "bigint"))
                .with_column(Column::new("bio", "text"))
                .with_primary_key(["user_id"])
                .with_foreign_key(ForeignKey::new("profile_user", "user_id", "user", "id")),
        );

        let mutations = infer(&catalog).unwrap();
        let user = mutations.get("User").unwrap();
        assert_eq!(
            user.edges.iter().map(ToString::to_string).collect::<Vec<_>>(),
            vec![r#"to("profile", Profile).unique()"#]
        );
        assert_snapshot!(render(mutations.get("Profile").unwrap()), @r#"
        int64("id").storage_key("user_id")
        string("bio")
        from("user", User).ref("profile").unique().field("id")
        "#);
    }

    #[test]
    fn test_table_names_with_digits() {
        let team = Table::new("team")
            .with_column(Column::new("id", "bigint"))
            .with_primary_key(["id"]);
        let catalog = Catalog::new("public").with_table(team).with_table(
            Table::new("t2")
                .with_column(Column::new("id", "bigint"))
                .with_column(Column::new("team_id", "bigint").nullable())
                .with_primary_key(["id"])
                .with_foreign_key(ForeignKey::new("t2_team", "team_id", "team", "id")),
        );

        let mutations = infer(&catalog).unwrap();
        assert_eq!(mutations.names().collect::<Vec<_>>(), vec!["Team", "T2"]);
        assert_eq!(
            mutations.get("Team").unwrap().edges[0].to_string(),
            r#"to("t2s", T2)"#
        );
        assert_eq!(
            mutations.get("T2").unwrap().edges[0].to_string(),
            r#"from("team", Team).ref("t2s").unique().field("team_id")"#
        );
    }

    // ========================================================================
    // Self-references
    // ========================================================================

    #[test]
    fn test_o2o_same_type() {
        let catalog = Catalog::new("public").with_table(
            Table::new("node")
                .with_column(Column::new("id", "bigint"))
                .with_column(Column::new("value", "bigint"))
                .with_column(Column::new("node_next", "bigint").nullable())
                .with_primary_key(["id"])
                .with_index(Index::unique("node_node_next_key", ["node_next"]))
                .with_foreign_key(ForeignKey::new("nodes_node_next", "node_next", "node", "id")),
        );

        let mutations = infer(&catalog).unwrap();
        assert_snapshot!(render(mutations.get("Node").unwrap()), @r#"
        int64("id")
        int64("value")
        int64("node_next").optional().unique()
        to("child_node", Node).unique()
        from("parent_node", Node).ref("child_node").unique().field("node_next")
        "#);
    }

    #[test]
    fn test_o2m_same_type() {
        let catalog = Catalog::new("public").with_table(
            Table::new("node")
                .with_column(Column::new("id", "bigint"))
                .with_column(Column::new("value", "bigint"))
                .with_column(Column::new("node_parent", "bigint").nullable())
                .with_primary_key(["id"])
                .with_foreign_key(ForeignKey::new(
                    "nodes_node_parent",
                    "node_parent",
                    "node",
                    "id",
                )),
        );

        let mutations = infer(&catalog).unwrap();
        let node = mutations.get("Node").unwrap();
        assert_snapshot!(render(node), @r#"
        int64("id")
        int64("value")
        int64("node_parent").optional()
        to("child_nodes", Node)
        from("parent_node", Node).ref("child_nodes").unique().field("node_parent")
        "#);
    }

    #[test]
    fn test_o2o_bidirectional_same_type() {
        let catalog = Catalog::new("public").with_table(
            user()
                .with_column(Column::new("user_spouse", "bigint").nullable())
                .with_index(Index::unique("user_user_spouse_key", ["user_spouse"]))
                .with_foreign_key(ForeignKey::new("users_user_spouse", "user_spouse", "user", "id")),
        );

        let mutations = infer(&catalog).unwrap();
        let user = mutations.get("User").unwrap();
        assert_eq!(
            user.edges.iter().map(ToString::to_string).collect::<Vec<_>>(),
            vec![
                r#"to("child_user", User).unique()"#,
                r#"from("parent_user", User).ref("child_user").unique().field("user_spouse")"#,
            ]
        );
    }

    #[test]
    fn test_m2m_same_type() {
        let catalog = Catalog::new("public").with_table(user()).with_table(join_table(
            "user_following",
            ("user_id", "user"),
            ("follower_id", "user"),
        ));

        let mutations = infer(&catalog).unwrap();
        assert_eq!(mutations.len(), 1);
        let user = mutations.get("User").unwrap();
        assert_eq!(
            user.edges.iter().map(ToString::to_string).collect::<Vec<_>>(),
            vec![
                r#"to("child_users", User)"#,
                r#"from("parent_users", User).ref("child_users")"#,
            ]
        );
        assert!(user.edges.iter().all(|e| e.shape == RelationShape::M2M));
    }

    // ========================================================================
    // Partial inspection and edge cases
    // ========================================================================

    #[test]
    fn test_other_side_ignored() {
        let catalog = Catalog::new("public").with_table(
            Table::new("pet")
                .with_column(Column::new("id", "bigint"))
                .with_column(Column::new("user_pets", "bigint").nullable())
                .with_primary_key(["id"])
                .with_foreign_key(ForeignKey::new("pets_user_pets", "user_pets", "user", "id")),
        );

        let mutations = infer(&catalog).unwrap();
        let pet = mutations.get("Pet").unwrap();
        assert!(pet.edges.is_empty());
        assert!(pet.field("user_pets").is_some());
        assert!(!mutations.contains("User"));
    }

    #[test]
    fn test_join_table_only_is_an_error() {
        let catalog = Catalog::new("public").with_table(join_table(
            "group_users",
            ("group_id", "group"),
            ("user_id", "user"),
        ));

        let err = infer(&catalog).unwrap_err();
        assert_eq!(
            err,
            InferenceError::MissingReferencedTable {
                join_table: "group_users".into(),
                missing: vec!["group".into(), "user".into()],
            }
        );
        assert!(err.to_string().contains("table selection"));
    }

    #[test]
    fn test_join_table_with_one_side_missing() {
        let catalog = Catalog::new("public").with_table(user()).with_table(join_table(
            "group_users",
            ("group_id", "group"),
            ("user_id", "user"),
        ));

        let err = infer(&catalog).unwrap_err();
        assert_eq!(
            err,
            InferenceError::MissingReferencedTable {
                join_table: "group_users".into(),
                missing: vec!["group".into()],
            }
        );
    }

    #[test]
    fn test_two_foreign_keys_to_same_table() {
        let catalog = Catalog::new("public").with_table(user()).with_table(
            Table::new("pet")
                .with_column(Column::new("id", "bigint"))
                .with_column(Column::new("owner_id", "bigint").nullable())
                .with_column(Column::new("vet_id", "bigint").nullable())
                .with_primary_key(["id"])
                .with_foreign_key(ForeignKey::new("pet_owner", "owner_id", "user", "id"))
                .with_foreign_key(ForeignKey::new("pet_vet", "vet_id", "user", "id")),
        );

        let mutations = infer(&catalog).unwrap();
        let user = mutations.get("User").unwrap();
        let pet = mutations.get("Pet").unwrap();

        assert_eq!(
            user.edges.iter().map(ToString::to_string).collect::<Vec<_>>(),
            vec![r#"to("pets", Pet)"#, r#"to("pets_vet_id", Pet)"#]
        );
        assert_eq!(
            pet.edges.iter().map(ToString::to_string).collect::<Vec<_>>(),
            vec![
                r#"from("user", User).ref("pets").unique().field("owner_id")"#,
                r#"from("user_vet_id", User).ref("pets_vet_id").unique().field("vet_id")"#,
            ]
        );
    }

    #[test]
    fn test_composite_foreign_key_has_no_edge() {
        let mut fk = ForeignKey::new("line_order", "order_id", "order", "id");
        fk.columns.push("order_rev".into());
        fk.referenced_columns.push("rev".into());

        let catalog = Catalog::new("public")
            .with_table(
                Table::new("order")
                    .with_column(Column::new("id", "bigint"))
                    .with_column(Column::new("rev", "integer"))
                    .with_primary_key(["id", "rev"]),
            )
            .with_table(
                Table::new("line")
                    .with_column(Column::new("id", "bigint"))
                    .with_column(Column::new("order_id", "bigint"))
                    .with_column(Column::new("order_rev", "integer"))
                    .with_primary_key(["id"])
                    .with_foreign_key(fk),
            );

        let mutations = infer(&catalog).unwrap();
        assert_eq!(mutations.edge_count(), 0);
        assert_eq!(mutations.get("Line").unwrap().fields.len(), 3);
    }

    #[test]
    fn test_every_from_edge_has_a_matching_to_edge() {
        let catalog = Catalog::new("public")
            .with_table(user())
            .with_table(
                Table::new("pet")
                    .with_column(Column::new("id", "bigint"))
                    .with_column(Column::new("user_pets", "bigint").nullable())
                    .with_primary_key(["id"])
                    .with_foreign_key(ForeignKey::new("pets_user_pets", "user_pets", "user", "id")),
            )
            .with_table(
                Table::new("group")
                    .with_column(Column::new("id", "bigint"))
                    .with_primary_key(["id"]),
            )
            .with_table(join_table(
                "group_users",
                ("group_id", "group"),
                ("user_id", "user"),
            ));

        let mutations = infer(&catalog).unwrap();
        for entity in mutations.iter() {
            for edge in entity.edges.iter().filter(|e| e.direction == EdgeDirection::From) {
                let target = mutations.get(&edge.target).unwrap();
                let ref_name = edge.ref_name.as_deref().unwrap();
                let inverse = target.edge(ref_name).unwrap();
                assert_eq!(inverse.direction, EdgeDirection::To);
                assert_eq!(inverse.target, entity.name);
            }
        }
    }

    #[test]
    fn test_inference_is_deterministic() {
        let catalog = Catalog::new("public").with_table(user()).with_table(join_table(
            "user_following",
            ("user_id", "user"),
            ("follower_id", "user"),
        ));
        assert_eq!(infer(&catalog).unwrap(), infer(&catalog).unwrap());
    }
}
