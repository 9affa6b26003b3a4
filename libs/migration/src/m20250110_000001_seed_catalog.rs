use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Insert sample brands
        manager
            .get_connection()
            .execute_unprepared(
                r#"
            INSERT INTO product_brands (id, name)
            VALUES
                (1, 'Northcrest'),
                (2, 'Veloway'),
                (3, 'Summitline'),
                (4, 'Aurora Gear'),
                (5, 'Trailforge')
            ON CONFLICT (id) DO NOTHING
            "#,
            )
            .await?;

        // Insert sample types
        manager
            .get_connection()
            .execute_unprepared(
                r#"
            INSERT INTO product_types (id, name)
            VALUES
                (1, 'Boards'),
                (2, 'Boots'),
                (3, 'Gloves'),
                (4, 'Hats')
            ON CONFLICT (id) DO NOTHING
            "#,
            )
            .await?;

        // Insert sample products
        manager
            .get_connection()
            .execute_unprepared(
                r#"
            INSERT INTO products (id, name, description, price, picture_url, brand_id, type_id)
            VALUES
                (1, 'Northcrest Speed Board', 'Lightweight all-mountain board with a carbon core.', 249.99, 'images/products/board-speed.png', 1, 1),
                (2, 'Veloway Park Board', 'Forgiving flex for rails and park laps.', 199.00, 'images/products/board-park.png', 2, 1),
                (3, 'Summitline Alpine Boots', 'Stiff boots for steep terrain and long descents.', 179.50, 'images/products/boots-alpine.png', 3, 2),
                (4, 'Trailforge Trek Boots', 'Waterproof boots with aggressive tread.', 129.99, 'images/products/boots-trek.png', 5, 2),
                (5, 'Aurora Thermal Gloves', 'Insulated gloves rated to -20C.', 45.00, 'images/products/gloves-thermal.png', 4, 3),
                (6, 'Veloway Grip Gloves', 'Thin gloves with silicone palm print.', 25.00, 'images/products/gloves-grip.png', 2, 3),
                (7, 'Northcrest Wool Beanie', 'Merino wool beanie, one size.', 19.99, 'images/products/hat-beanie.png', 1, 4),
                (8, 'Summitline Sun Cap', 'Breathable cap with UPF 50 fabric.', 15.00, 'images/products/hat-cap.png', 3, 4)
            ON CONFLICT (id) DO NOTHING
            "#,
            )
            .await?;

        // Keep the identity sequences ahead of the seeded ids
        manager
            .get_connection()
            .execute_unprepared(
                r#"
            SELECT setval(pg_get_serial_sequence('product_brands', 'id'), (SELECT MAX(id) FROM product_brands));
            SELECT setval(pg_get_serial_sequence('product_types', 'id'), (SELECT MAX(id) FROM product_types));
            SELECT setval(pg_get_serial_sequence('products', 'id'), (SELECT MAX(id) FROM products));
            "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DELETE FROM products WHERE id BETWEEN 1 AND 8")
            .await?;

        manager
            .get_connection()
            .execute_unprepared("DELETE FROM product_types WHERE id BETWEEN 1 AND 4")
            .await?;

        manager
            .get_connection()
            .execute_unprepared("DELETE FROM product_brands WHERE id BETWEEN 1 AND 5")
            .await?;

        Ok(())
    }
}
