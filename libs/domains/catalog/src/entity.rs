//! Sea-ORM entities for the catalog tables.

pub mod products {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
    #[sea_orm(table_name = "products")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,
        pub name: String,
        #[sea_orm(column_type = "Text")]
        pub description: String,
        pub price: f64,
        pub picture_url: String,
        pub brand_id: i32,
        pub type_id: i32,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::brands::Entity",
            from = "Column::BrandId",
            to = "super::brands::Column::Id"
        )]
        Brand,
        #[sea_orm(
            belongs_to = "super::product_types::Entity",
            from = "Column::TypeId",
            to = "super::product_types::Column::Id"
        )]
        ProductType,
    }

    impl Related<super::brands::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Brand.def()
        }
    }

    impl Related<super::product_types::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::ProductType.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

pub mod brands {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
    #[sea_orm(table_name = "product_brands")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,
        pub name: String,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(has_many = "super::products::Entity")]
        Products,
    }

    impl Related<super::products::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Products.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}

    impl From<Model> for crate::models::Brand {
        fn from(model: Model) -> Self {
            Self {
                id: model.id,
                name: model.name,
            }
        }
    }
}

pub mod product_types {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
    #[sea_orm(table_name = "product_types")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,
        pub name: String,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(has_many = "super::products::Entity")]
        Products,
    }

    impl Related<super::products::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Products.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}

    impl From<Model> for crate::models::ProductType {
        fn from(model: Model) -> Self {
            Self {
                id: model.id,
                name: model.name,
            }
        }
    }
}
